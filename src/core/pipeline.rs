use crate::core::generator::BlogGenerationService;
use crate::core::{
    BlogPost, ConfigProvider, GenerationReport, KeywordSource, Pipeline, SavedPost, Storage,
};
use crate::utils::error::{Result, SeoBlogError};
use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

pub const SUMMARY_FILE: &str = "seo_blog_summary.csv";
const SEPARATOR_WIDTH: usize = 50;

/// Generates one post per configured product and writes them through the
/// storage backend.
pub struct BlogPipeline<S, C, K, R = StdRng>
where
    S: Storage,
    C: ConfigProvider,
    K: KeywordSource,
    R: Rng,
{
    storage: S,
    config: C,
    service: BlogGenerationService<K, R>,
}

impl<S, C, K, R> BlogPipeline<S, C, K, R>
where
    S: Storage,
    C: ConfigProvider,
    K: KeywordSource,
    R: Rng,
{
    pub fn new(storage: S, config: C, service: BlogGenerationService<K, R>) -> Self {
        Self {
            storage,
            config,
            service,
        }
    }

    fn wants_format(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }
}

#[derive(Serialize)]
struct PostDocument<'a> {
    #[serde(flatten)]
    post: &'a BlogPost,
    generated_at: String,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    product_name: &'a str,
    keywords: String,
    keyword_origin: String,
    word_count: usize,
    files: String,
    generated_at: String,
}

#[async_trait::async_trait]
impl<S, C, K, R> Pipeline for BlogPipeline<S, C, K, R>
where
    S: Storage,
    C: ConfigProvider,
    K: KeywordSource + Sync,
    R: Rng + Send + Sync,
{
    async fn extract(&self) -> Result<Vec<String>> {
        let mut products: Vec<String> = self.config.products().to_vec();

        if let Some(path) = self.config.products_file() {
            tracing::debug!("Reading product names from: {}", path);
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                SeoBlogError::ConfigValidationError {
                    field: "products_file".to_string(),
                    message: format!("Cannot read '{}': {}", path, e),
                }
            })?;
            products.extend(parse_product_list(&content));
        }

        if products.is_empty() {
            return Err(SeoBlogError::MissingConfigError {
                field: "products".to_string(),
            });
        }

        Ok(products)
    }

    async fn transform(&mut self, products: Vec<String>) -> Result<Vec<BlogPost>> {
        let mut posts = Vec::with_capacity(products.len());

        // 任何一筆失敗就整批中止，load 之前不寫任何檔案
        for product in &products {
            let post = self.service.generate(product).await?;
            posts.push(post);
        }

        Ok(posts)
    }

    async fn load(&self, posts: Vec<BlogPost>) -> Result<GenerationReport> {
        let generated_at = Local::now();
        let timestamp = format_timestamp(&generated_at);
        let mut saved = Vec::with_capacity(posts.len());
        let stems = unique_stems(&posts);

        for (post, stem) in posts.into_iter().zip(stems) {
            let mut paths = Vec::new();

            if self.wants_format("txt") {
                let content = render_text_file(&post, &timestamp);
                let path = self
                    .storage
                    .write_file(&format!("{}.txt", stem), content.as_bytes())
                    .await?;
                paths.push(path);
            }

            if self.wants_format("json") {
                let document = PostDocument {
                    post: &post,
                    generated_at: timestamp.clone(),
                };
                let json = serde_json::to_string_pretty(&document)?;
                let path = self
                    .storage
                    .write_file(&format!("{}.json", stem), json.as_bytes())
                    .await?;
                paths.push(path);
            }

            saved.push(SavedPost {
                post,
                paths,
                generated_at,
            });
        }

        let summary_path = if self.config.write_summary() {
            let data = render_summary_csv(&saved)?;
            tracing::debug!("Writing summary CSV ({} bytes)", data.len());
            Some(self.storage.write_file(SUMMARY_FILE, &data).await?)
        } else {
            None
        };

        Ok(GenerationReport {
            posts: saved,
            summary_path,
        })
    }
}

/// File stems for a batch. Names that slugify to the same stem get `_2`,
/// `_3`, ... so no post overwrites another.
fn unique_stems(posts: &[BlogPost]) -> Vec<String> {
    let mut taken = HashSet::new();

    posts
        .iter()
        .map(|post| {
            let base = format!("seo_blog_{}", slugify(post.product_name()));
            let mut stem = base.clone();
            let mut n = 2;
            while !taken.insert(stem.clone()) {
                stem = format!("{}_{}", base, n);
                n += 1;
            }
            stem
        })
        .collect()
}

/// One product per line; blank lines and `#` comments are skipped.
pub fn parse_product_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// File-name stem for a product: lower-case, whitespace runs become `_`,
/// anything other than alphanumerics, `_` and `-` is dropped.
pub fn slugify(product_name: &str) -> String {
    let slug = product_name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    if slug.is_empty() {
        "post".to_string()
    } else {
        slug
    }
}

pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn render_text_file(post: &BlogPost, timestamp: &str) -> String {
    format!(
        "Product: {}\nKeywords: {}\nWord Count: {}\nGenerated on: {}\n\n{}\n{}",
        post.product_name(),
        post.keywords().join(", "),
        post.word_count(),
        timestamp,
        "=".repeat(SEPARATOR_WIDTH),
        post.body()
    )
}

fn render_summary_csv(saved: &[SavedPost]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for entry in saved {
        writer.serialize(SummaryRow {
            product_name: entry.post.product_name(),
            keywords: entry.post.keywords().join("; "),
            keyword_origin: entry.post.keyword_origin().to_string(),
            word_count: entry.post.word_count(),
            files: entry.paths.join("; "),
            generated_at: format_timestamp(&entry.generated_at),
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| SeoBlogError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::composer::TemplateComposer;
    use crate::core::engine::BlogEngine;
    use crate::domain::model::{KeywordOrigin, KeywordSet};
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::NamedTempFile;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        async fn file_count(&self) -> usize {
            self.files.lock().await.len()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(format!("mock/{}", path))
        }
    }

    struct MockConfig {
        products: Vec<String>,
        products_file: Option<String>,
        formats: Vec<String>,
        summary: bool,
    }

    impl MockConfig {
        fn new(products: &[&str]) -> Self {
            Self {
                products: products.iter().map(|p| p.to_string()).collect(),
                products_file: None,
                formats: vec!["txt".to_string()],
                summary: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn keyword_endpoint(&self) -> &str {
            "http://127.0.0.1:9/"
        }

        fn output_path(&self) -> &str {
            "mock"
        }

        fn products(&self) -> &[String] {
            &self.products
        }

        fn products_file(&self) -> Option<&str> {
            self.products_file.as_deref()
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(1)
        }

        fn request_delay(&self) -> Duration {
            Duration::ZERO
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
            Some(1)
        }
    }

    struct StubKeywords;

    #[async_trait::async_trait]
    impl KeywordSource for StubKeywords {
        async fn fetch_keywords(&mut self, product_name: &str) -> KeywordSet {
            KeywordSet::fallback(vec![
                format!("best {}", product_name),
                format!("{} reviews", product_name),
                format!("cheap {}", product_name),
            ])
        }
    }

    fn pipeline(
        storage: MockStorage,
        config: MockConfig,
    ) -> BlogPipeline<MockStorage, MockConfig, StubKeywords> {
        let service = BlogGenerationService::new(StubKeywords, TemplateComposer::from_seed(3));
        BlogPipeline::new(storage, config, service)
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Wireless Earbuds"), "wireless_earbuds");
        assert_eq!(slugify("  USB-C   Hub / Dock "), "usb-c_hub_dock");
        assert_eq!(slugify("!!!"), "post");
    }

    #[test]
    fn test_parse_product_list() {
        let content = "wireless earbuds\n\n# comment\n  smart watch  \n";
        assert_eq!(parse_product_list(content), vec!["wireless earbuds", "smart watch"]);
    }

    #[test]
    fn test_render_text_file_layout() {
        let post = BlogPost::new(
            "smart watch",
            KeywordSet::scraped(vec!["one1".into(), "two2".into(), "three3".into()]),
            "Body words here".to_string(),
        );

        let content = render_text_file(&post, "2025-01-02 03:04:05");
        let expected = format!(
            "Product: smart watch\nKeywords: one1, two2, three3\nWord Count: 3\nGenerated on: 2025-01-02 03:04:05\n\n{}\nBody words here",
            "=".repeat(50)
        );
        assert_eq!(content, expected);
    }

    #[tokio::test]
    async fn test_extract_combines_list_and_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "yoga mat\n# skipped\n\nstanding desk").unwrap();

        let mut config = MockConfig::new(&["wireless earbuds"]);
        config.products_file = Some(file.path().to_str().unwrap().to_string());

        let products = pipeline(MockStorage::new(), config).extract().await.unwrap();
        assert_eq!(products, vec!["wireless earbuds", "yoga mat", "standing desk"]);
    }

    #[tokio::test]
    async fn test_extract_without_products_fails() {
        let result = pipeline(MockStorage::new(), MockConfig::new(&[])).extract().await;
        assert!(matches!(result, Err(SeoBlogError::MissingConfigError { .. })));
    }

    #[tokio::test]
    async fn test_transform_generates_one_post_per_product() {
        let mut pipeline = pipeline(MockStorage::new(), MockConfig::new(&[]));

        let posts = pipeline
            .transform(vec!["smart watch".to_string(), "yoga mat".to_string()])
            .await
            .unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].product_name(), "smart watch");
        assert_eq!(posts[1].keyword_origin(), KeywordOrigin::Fallback);
        assert!(posts[1].body().contains("best yoga mat"));
    }

    #[tokio::test]
    async fn test_load_writes_text_and_json() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new(&[]);
        config.formats = vec!["txt".to_string(), "json".to_string()];
        let mut pipeline = pipeline(storage.clone(), config);

        let posts = pipeline
            .transform(vec!["Wireless Earbuds".to_string()])
            .await
            .unwrap();
        let report = pipeline.load(posts).await.unwrap();

        assert_eq!(report.posts.len(), 1);
        assert_eq!(
            report.posts[0].paths,
            vec![
                "mock/seo_blog_wireless_earbuds.txt",
                "mock/seo_blog_wireless_earbuds.json"
            ]
        );
        assert!(report.summary_path.is_none());

        let text = storage.get_file("seo_blog_wireless_earbuds.txt").await.unwrap();
        let text = String::from_utf8(text).unwrap();
        assert!(text.starts_with("Product: Wireless Earbuds\nKeywords: best Wireless Earbuds"));
        assert!(text.contains(&"=".repeat(50)));

        let json = storage.get_file("seo_blog_wireless_earbuds.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["product_name"], "Wireless Earbuds");
        assert_eq!(value["keyword_origin"], "fallback");
        assert!(value["generated_at"].is_string());
        assert_eq!(value["keywords"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_load_writes_summary_csv() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new(&[]);
        config.summary = true;
        let mut pipeline = pipeline(storage.clone(), config);

        let posts = pipeline
            .transform(vec!["smart watch".to_string(), "yoga mat".to_string()])
            .await
            .unwrap();
        let report = pipeline.load(posts).await.unwrap();

        assert_eq!(report.summary_path.as_deref(), Some("mock/seo_blog_summary.csv"));

        let csv_data = storage.get_file(SUMMARY_FILE).await.unwrap();
        let mut reader = csv::Reader::from_reader(csv_data.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["product_name", "keywords", "keyword_origin", "word_count", "files", "generated_at"]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "smart watch");
        assert_eq!(&rows[0][1], "best smart watch; smart watch reviews; cheap smart watch");
        assert_eq!(&rows[0][2], "fallback");
        assert_eq!(&rows[1][4], "mock/seo_blog_yoga_mat.txt");
    }

    #[tokio::test]
    async fn test_load_keeps_colliding_product_names_apart() {
        let storage = MockStorage::new();
        let mut pipeline = pipeline(storage.clone(), MockConfig::new(&[]));

        let posts = pipeline
            .transform(vec![
                "Smart Watch".to_string(),
                "smart watch".to_string(),
                "smart watch!".to_string(),
            ])
            .await
            .unwrap();
        let report = pipeline.load(posts).await.unwrap();

        let paths: Vec<&str> = report
            .posts
            .iter()
            .map(|s| s.paths[0].as_str())
            .collect();
        assert_eq!(
            paths,
            vec![
                "mock/seo_blog_smart_watch.txt",
                "mock/seo_blog_smart_watch_2.txt",
                "mock/seo_blog_smart_watch_3.txt"
            ]
        );
        assert_eq!(storage.file_count().await, 3);

        let second = storage.get_file("seo_blog_smart_watch_2.txt").await.unwrap();
        assert!(String::from_utf8(second)
            .unwrap()
            .starts_with("Product: smart watch\n"));
    }

    #[tokio::test]
    async fn test_extract_unreadable_products_file_is_config_error() {
        let mut config = MockConfig::new(&[]);
        config.products_file = Some("/nonexistent/dir/products.txt".to_string());

        let result = pipeline(MockStorage::new(), config).extract().await;

        match result {
            Err(SeoBlogError::ConfigValidationError { field, message }) => {
                assert_eq!(field, "products_file");
                assert!(message.contains("/nonexistent/dir/products.txt"));
            }
            other => panic!("unexpected result: {:?}", other.map(|p| p.len())),
        }
    }

    #[tokio::test]
    async fn test_engine_failure_writes_nothing() {
        let storage = MockStorage::new();
        let config = MockConfig::new(&["smart watch", "   "]);
        let mut engine = BlogEngine::new(pipeline(storage.clone(), config));

        let result = engine.run().await;

        assert!(matches!(result, Err(SeoBlogError::InvalidInput { .. })));
        assert_eq!(storage.file_count().await, 0);
    }

    #[tokio::test]
    async fn test_engine_run_reports_saved_posts() {
        let storage = MockStorage::new();
        let config = MockConfig::new(&["smart watch", "yoga mat"]);
        let mut engine = BlogEngine::new(pipeline(storage.clone(), config));

        let report = engine.run().await.unwrap();

        assert_eq!(report.posts.len(), 2);
        assert_eq!(storage.file_count().await, 2);
        for saved in &report.posts {
            assert_eq!(saved.post.word_count(), saved.post.body().split_whitespace().count());
        }
    }
}
