use crate::core::keywords::MIN_KEYWORDS;
use crate::utils::error::{Result, SeoBlogError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Placeholders: {product}, {k1}, {k2}, {k3}
const INTRO_TEMPLATES: [&str; 3] = [
    "In the world of modern technology, {product} have become a must-have for anyone seeking convenience and performance. Whether you're a student, professional, or casual user, these products are changing the way we experience the digital world.",
    "Today's market for {product} is more competitive than ever, offering consumers incredible choices for their daily needs. From budget-friendly options to premium models, there's something for everyone looking to upgrade their tech arsenal.",
    "The demand for {product} continues to grow as more people discover their versatility and value. These innovative products are transforming how we work, play, and stay connected in our fast-paced digital lives.",
];

const FEATURES_TEMPLATES: [&str; 3] = [
    "One of the most searched terms today is \"{k1}\" — a clear sign that users want top-notch performance. Alongside that, many shoppers are looking for \"{k2}\" and \"{k3}\" when making a purchase decision.",
    "Market research shows that \"{k1}\" is trending among consumers who prioritize quality and value. Similarly, \"{k2}\" and \"{k3}\" are frequently searched terms that indicate what buyers really want.",
    "Consumer behavior analysis reveals that \"{k1}\" remains a top priority for smart shoppers. The growing interest in \"{k2}\" and \"{k3}\" also demonstrates the evolving needs of today's tech-savvy users.",
];

const BENEFITS_TEMPLATES: [&str; 3] = [
    "{product} often combine cutting-edge features with sleek design, offering something for everyone. With strong battery life, noise isolation, and seamless connectivity, they're redefining portable audio and productivity.",
    "What makes {product} stand out is their perfect balance of functionality and style. Modern versions feature enhanced durability, improved performance, and user-friendly interfaces that make them ideal for daily use.",
    "The latest {product} showcase remarkable innovation in both design and technology. From extended battery life to superior build quality, these products deliver exceptional value for money.",
];

const CONCLUSION_TEMPLATES: [&str; 3] = [
    "If you're in the market for a new gadget or accessory, consider exploring options that match these trending needs. {product} continue to impress users and reviewers alike, making them a smart investment in 2025.",
    "With so many excellent options available, now is the perfect time to invest in quality {product}. Their combination of affordability and advanced features makes them an excellent choice for any budget.",
    "The future looks bright for {product} as manufacturers continue to innovate and improve. Whether you're upgrading or buying for the first time, you can't go wrong with today's top-rated models.",
];

const EXTRA_KEYWORD_SENTENCE: &str =
    " Not to mention, \"{k4}\" is gaining popularity for those seeking extra value.";

/// Renders a post from four paragraph pools. The random source is injected
/// so a seeded or stub generator gives repeatable output.
pub struct TemplateComposer<R: Rng = StdRng> {
    rng: R,
}

impl TemplateComposer<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TemplateComposer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn compose(&mut self, product_name: &str, keywords: &[String]) -> Result<String> {
        if keywords.len() < MIN_KEYWORDS {
            return Err(SeoBlogError::InsufficientKeywords {
                found: keywords.len(),
            });
        }

        let (k1, k2, k3) = (&keywords[0], &keywords[1], &keywords[2]);
        let k4 = keywords.get(3);

        let intro = self.pick(&INTRO_TEMPLATES).replace("{product}", product_name);
        let mut features = self
            .pick(&FEATURES_TEMPLATES)
            .replace("{k1}", k1)
            .replace("{k2}", k2)
            .replace("{k3}", k3);
        let benefits = self.pick(&BENEFITS_TEMPLATES).replace("{product}", product_name);
        let conclusion = self
            .pick(&CONCLUSION_TEMPLATES)
            .replace("{product}", product_name);

        if let Some(k4) = k4 {
            features.push_str(&EXTRA_KEYWORD_SENTENCE.replace("{k4}", k4));
        }

        Ok([intro, features, benefits, conclusion].join("\n\n"))
    }

    fn pick(&mut self, pool: &[&'static str]) -> &'static str {
        pool[self.rng.gen_range(0..pool.len())]
    }
}
