use crate::core::{GenerationReport, Pipeline};
use crate::utils::error::Result;

pub struct BlogEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BlogEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&mut self) -> Result<GenerationReport> {
        tracing::info!("Starting blog generation...");

        // Extract
        let products = self.pipeline.extract().await?;
        tracing::info!("Collected {} product names", products.len());

        // Transform
        let posts = self.pipeline.transform(products).await?;
        tracing::info!("Generated {} blog posts", posts.len());

        // Load
        let report = self.pipeline.load(posts).await?;
        for saved in &report.posts {
            for path in &saved.paths {
                tracing::info!("💾 Blog post saved to: {}", path);
            }
        }
        if let Some(summary) = &report.summary_path {
            tracing::info!("📈 Summary saved to: {}", summary);
        }

        Ok(report)
    }
}
