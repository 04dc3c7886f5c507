use crate::config::SUPPORTED_FORMATS;
use crate::core::keywords::{
    DEFAULT_DELAY_SECONDS, DEFAULT_KEYWORD_ENDPOINT, DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SeoBlogError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

#[allow(clippy::expect_used)]
static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub keywords: KeywordsConfig,
    #[serde(default)]
    pub products: ProductsConfig,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub name: String,
    pub description: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordsConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub delay_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductsConfig {
    #[serde(default)]
    pub names: Vec<String>,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    pub summary_csv: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

fn default_formats() -> Vec<String> {
    vec!["txt".to_string()]
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SeoBlogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SeoBlogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("generator.name", &self.generator.name)?;
        validation::validate_url("keywords.endpoint", self.keyword_endpoint())?;
        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_range("keywords.timeout_seconds", self.timeout_seconds(), 1, 300)?;
        validation::validate_range("keywords.delay_seconds", self.delay_seconds(), 0, 60)?;
        validation::validate_range(
            "output.formats",
            self.output.formats.len(),
            1,
            SUPPORTED_FORMATS.len(),
        )?;
        validation::validate_allowed_values("output.formats", &self.output.formats, &SUPPORTED_FORMATS)?;

        if self.products.names.is_empty() {
            let file = validation::validate_required_field("products.file", &self.products.file)?;
            validation::validate_path("products.file", file)?;
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_ref()) {
            validation::validate_allowed_values(
                "logging.format",
                std::slice::from_ref(format),
                &["compact", "json"],
            )?;
        }

        Ok(())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.keywords.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn delay_seconds(&self) -> u64 {
        self.keywords.delay_seconds.unwrap_or(DEFAULT_DELAY_SECONDS)
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn keyword_endpoint(&self) -> &str {
        self.keywords
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_KEYWORD_ENDPOINT)
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn products(&self) -> &[String] {
        &self.products.names
    }

    fn products_file(&self) -> Option<&str> {
        self.products.file.as_deref()
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds())
    }

    fn request_delay(&self) -> Duration {
        Duration::from_secs(self.delay_seconds())
    }

    fn user_agent(&self) -> Option<&str> {
        self.keywords.user_agent.as_deref()
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        self.keywords
            .headers
            .as_ref()
            .map(|headers| {
                headers
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn write_summary(&self) -> bool {
        self.output.summary_csv.unwrap_or(false)
    }

    fn seed(&self) -> Option<u64> {
        self.generator.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
