pub mod cli;
pub mod toml_config;

/// Output formats a post can be written in.
pub const SUPPORTED_FORMATS: [&str; 2] = ["txt", "json"];

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use super::SUPPORTED_FORMATS;
    use crate::core::keywords::DEFAULT_KEYWORD_ENDPOINT;
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_allowed_values, validate_path, validate_range, validate_url, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "seo-blog-gen")]
    #[command(about = "Generate short SEO blog posts for products")]
    pub struct CliConfig {
        /// Product name to write about; repeat for several products
        #[arg(long = "product")]
        pub products: Vec<String>,

        /// File with one product name per line
        #[arg(long)]
        pub products_file: Option<String>,

        #[arg(long, default_value = DEFAULT_KEYWORD_ENDPOINT)]
        pub keyword_endpoint: String,

        #[arg(long, default_value = ".")]
        pub output_path: String,

        #[arg(long, default_value = "10")]
        pub timeout_seconds: u64,

        /// Pause before each keyword request
        #[arg(long, default_value = "2")]
        pub delay_seconds: u64,

        #[arg(long = "format", value_delimiter = ',', default_value = "txt")]
        pub formats: Vec<String>,

        #[arg(long, help = "Write seo_blog_summary.csv next to the posts")]
        pub summary: bool,

        #[arg(long, help = "Seed for keyword shuffling and template choice")]
        pub seed: Option<u64>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn keyword_endpoint(&self) -> &str {
            &self.keyword_endpoint
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn products(&self) -> &[String] {
            &self.products
        }

        fn products_file(&self) -> Option<&str> {
            self.products_file.as_deref()
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(self.timeout_seconds)
        }

        fn request_delay(&self) -> Duration {
            Duration::from_secs(self.delay_seconds)
        }

        fn user_agent(&self) -> Option<&str> {
            None
        }

        fn extra_headers(&self) -> Vec<(String, String)> {
            Vec::new()
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn write_summary(&self) -> bool {
            self.summary
        }

        fn seed(&self) -> Option<u64> {
            self.seed
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_url("keyword_endpoint", &self.keyword_endpoint)?;
            validate_path("output_path", &self.output_path)?;
            validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
            validate_range("delay_seconds", self.delay_seconds, 0, 60)?;
            validate_range("format", self.formats.len(), 1, SUPPORTED_FORMATS.len())?;
            validate_allowed_values("format", &self.formats, &SUPPORTED_FORMATS)?;
            Ok(())
        }
    }

}
