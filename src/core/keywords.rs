use crate::core::{ConfigProvider, KeywordSet, KeywordSource};
use crate::utils::error::{LookupError, Result, SeoBlogError};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION,
    UPGRADE_INSECURE_REQUESTS,
};
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_KEYWORD_ENDPOINT: &str = "https://neilpatel.com/ubersuggest/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_DELAY_SECONDS: u64 = 2;

pub const MIN_KEYWORDS: usize = 3;
pub const MAX_KEYWORDS: usize = 4;

/// Selectors tried in order against the suggestion page.
const KEYWORD_SELECTORS: [&str; 5] = [
    ".keyword-suggestion",
    ".keyword-item",
    "[data-keyword]",
    ".suggestion-item",
    ".related-keyword",
];

#[allow(clippy::expect_used)]
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Outbound HTTP settings for the keyword lookup. Built once and handed to
/// [`SuggestionKeywordSource::new`].
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
    pub delay: Duration,
}

impl HttpClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            delay: Duration::from_secs(DEFAULT_DELAY_SECONDS),
        }
    }

    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            endpoint: config.keyword_endpoint().to_string(),
            user_agent: config
                .user_agent()
                .unwrap_or(DEFAULT_USER_AGENT)
                .to_string(),
            headers: config.extra_headers(),
            timeout: config.request_timeout(),
            delay: config.request_delay(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                SeoBlogError::InvalidConfigValueError {
                    field: "keywords.headers".to_string(),
                    value: key.clone(),
                    reason: format!("Invalid header name: {}", e),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                SeoBlogError::InvalidConfigValueError {
                    field: format!("keywords.headers.{}", key),
                    value: value.clone(),
                    reason: format!("Invalid header value: {}", e),
                }
            })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    fn build_client(&self) -> Result<Client> {
        let client = Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(self.default_headers()?)
            .timeout(self.timeout)
            .build()?;
        Ok(client)
    }
}

/// Keyword source backed by a keyword-suggestion web page, with synthesized
/// keywords as the fallback.
pub struct SuggestionKeywordSource<R: Rng + Send = StdRng> {
    config: HttpClientConfig,
    client: Client,
    rng: R,
}

impl<R: Rng + Send> SuggestionKeywordSource<R> {
    pub fn new(config: HttpClientConfig, rng: R) -> Result<Self> {
        let client = config.build_client()?;
        Ok(Self {
            config,
            client,
            rng,
        })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl<R: Rng + Send> KeywordSource for SuggestionKeywordSource<R> {
    async fn fetch_keywords(&mut self, product_name: &str) -> KeywordSet {
        match lookup(&self.client, &self.config, product_name).await {
            Ok(keywords) => {
                tracing::info!("🔑 Found keywords for '{}': {:?}", product_name, keywords);
                KeywordSet::scraped(keywords)
            }
            Err(e) => {
                tracing::warn!("⚠️ Keyword lookup failed for '{}': {}", product_name, e);
                tracing::info!("Using fallback keyword generation...");
                KeywordSet::fallback(fallback_keywords(product_name, &mut self.rng))
            }
        }
    }
}

async fn lookup(
    client: &Client,
    config: &HttpClientConfig,
    product_name: &str,
) -> std::result::Result<Vec<String>, LookupError> {
    if !config.delay.is_zero() {
        tracing::debug!("Waiting {:?} before keyword request", config.delay);
        tokio::time::sleep(config.delay).await;
    }

    tracing::debug!(
        "Fetching keywords from: {} (keyword={})",
        config.endpoint,
        product_name
    );
    let response = client
        .get(&config.endpoint)
        .query(&[("keyword", product_name)])
        .send()
        .await?;

    let status = response.status();
    tracing::debug!("Keyword endpoint response status: {}", status);
    if !status.is_success() {
        return Err(LookupError::Status(status));
    }

    let body = response.text().await?;
    let keywords = extract_keywords(&body);

    if keywords.len() < MIN_KEYWORDS {
        return Err(LookupError::TooFewKeywords {
            found: keywords.len(),
        });
    }

    Ok(keywords)
}

/// Pulls up to [`MAX_KEYWORDS`] distinct keyword fragments out of a
/// suggestion page. Best effort: the page layout is not under our control.
pub fn extract_keywords(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut keywords = Vec::new();
    let mut seen = HashSet::new();

    for selector_str in KEYWORD_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };

        for element in document.select(&selector) {
            // data-keyword 優先，其次才是元素文字
            let raw = match element.value().attr("data-keyword") {
                Some(value) if !value.trim().is_empty() => value.to_string(),
                _ => element.text().collect::<String>(),
            };

            if let Some(keyword) = clean_keyword(&raw) {
                if seen.insert(keyword.to_lowercase()) {
                    keywords.push(keyword);
                }
            }

            if keywords.len() >= MAX_KEYWORDS {
                return keywords;
            }
        }
    }

    keywords
}

fn clean_keyword(raw: &str) -> Option<String> {
    let stripped = NON_WORD.replace_all(raw, "");
    let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.chars().count() > 3 {
        Some(cleaned)
    } else {
        None
    }
}

/// The ten qualifier patterns for a product, in their fixed order.
pub fn fallback_patterns(product_name: &str) -> Vec<String> {
    let product = product_name.trim();
    vec![
        format!("best {}", product),
        format!("affordable {}", product),
        format!("top {}", product),
        format!("{} reviews", product),
        format!("cheap {}", product),
        format!("{} deals", product),
        format!("premium {}", product),
        format!("{} guide", product),
        format!("{} comparison", product),
        format!("buy {}", product),
    ]
}

pub fn fallback_keywords<R: Rng + ?Sized>(product_name: &str, rng: &mut R) -> Vec<String> {
    let mut patterns = fallback_patterns(product_name);
    patterns.shuffle(rng);
    patterns.truncate(MAX_KEYWORDS);
    patterns
}
