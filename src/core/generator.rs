use crate::core::composer::TemplateComposer;
use crate::core::{BlogPost, KeywordSource};
use crate::utils::error::{Result, SeoBlogError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Builds a `StdRng`, seeded when `seed` is given. `stream` keeps the
/// generators of different components apart under the same seed.
pub fn rng_from_seed(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_entropy(),
    }
}

pub struct BlogGenerationService<K: KeywordSource, R: Rng = StdRng> {
    keyword_source: K,
    composer: TemplateComposer<R>,
}

impl<K: KeywordSource, R: Rng> BlogGenerationService<K, R> {
    pub fn new(keyword_source: K, composer: TemplateComposer<R>) -> Self {
        Self {
            keyword_source,
            composer,
        }
    }

    pub async fn generate(&mut self, product_name: &str) -> Result<BlogPost> {
        let product_name = product_name.trim();
        if product_name.is_empty() {
            return Err(SeoBlogError::InvalidInput {
                message: "Product name cannot be empty!".to_string(),
            });
        }

        tracing::info!("🚀 Starting SEO blog generation for: {}", product_name);

        tracing::info!("📝 Step 1: Extracting keywords...");
        let keywords = self.keyword_source.fetch_keywords(product_name).await;
        tracing::info!(
            "✅ Keywords ({}): {}",
            keywords.origin,
            keywords.keywords.join(", ")
        );

        tracing::info!("📝 Step 2: Generating SEO blog post...");
        let body = self.composer.compose(product_name, &keywords.keywords)?;
        let post = BlogPost::new(product_name, keywords, body);

        tracing::info!("📊 Word count: {} words", post.word_count());
        Ok(post)
    }
}
