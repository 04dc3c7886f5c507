use crate::domain::model::{BlogPost, GenerationReport, KeywordSet};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Writes `data` to `path` and returns the full location written.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn keyword_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn products(&self) -> &[String];
    fn products_file(&self) -> Option<&str>;
    fn request_timeout(&self) -> Duration;
    fn request_delay(&self) -> Duration;
    fn user_agent(&self) -> Option<&str>;
    fn extra_headers(&self) -> Vec<(String, String)>;
    fn output_formats(&self) -> &[String];
    fn write_summary(&self) -> bool;
    fn seed(&self) -> Option<u64>;
}

/// Produces 3-4 keywords for a product. Implementations never fail; lookup
/// problems turn into synthesized keywords.
#[async_trait]
pub trait KeywordSource: Send {
    async fn fetch_keywords(&mut self, product_name: &str) -> KeywordSet;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<String>>;
    async fn transform(&mut self, products: Vec<String>) -> Result<Vec<BlogPost>>;
    async fn load(&self, posts: Vec<BlogPost>) -> Result<GenerationReport>;
}
