use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a keyword set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordOrigin {
    Scraped,
    Fallback,
}

impl fmt::Display for KeywordOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeywordOrigin::Scraped => write!(f, "scraped"),
            KeywordOrigin::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    pub keywords: Vec<String>,
    pub origin: KeywordOrigin,
}

impl KeywordSet {
    pub fn scraped(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            origin: KeywordOrigin::Scraped,
        }
    }

    pub fn fallback(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            origin: KeywordOrigin::Fallback,
        }
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// A generated post. `word_count` is computed from `body` when the post is
/// built and the fields are not mutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPost {
    product_name: String,
    keywords: Vec<String>,
    body: String,
    word_count: usize,
    keyword_origin: KeywordOrigin,
}

impl BlogPost {
    pub fn new(product_name: impl Into<String>, keywords: KeywordSet, body: String) -> Self {
        let word_count = count_words(&body);
        Self {
            product_name: product_name.into(),
            keywords: keywords.keywords,
            body,
            word_count,
            keyword_origin: keywords.origin,
        }
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn keyword_origin(&self) -> KeywordOrigin {
        self.keyword_origin
    }
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A post that has been written to storage, one path per output format.
#[derive(Debug, Clone, Serialize)]
pub struct SavedPost {
    pub post: BlogPost,
    pub paths: Vec<String>,
    pub generated_at: DateTime<Local>,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub posts: Vec<SavedPost>,
    pub summary_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_matches_body() {
        let body = "First paragraph here.\n\nSecond   paragraph\twith tabs.".to_string();
        let post = BlogPost::new(
            "smart watch",
            KeywordSet::fallback(vec!["a".into(), "b".into(), "c".into()]),
            body,
        );

        assert_eq!(post.word_count(), 7);
        assert_eq!(post.word_count(), count_words(post.body()));
        assert_eq!(post.keyword_origin(), KeywordOrigin::Fallback);
    }

    #[test]
    fn test_count_words_empty() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  \n\n  "), 0);
    }

    #[test]
    fn test_blog_post_serializes_origin_lowercase() {
        let post = BlogPost::new(
            "laptop stand",
            KeywordSet::scraped(vec!["one".into(), "two".into(), "three".into()]),
            "Body text".to_string(),
        );
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["keyword_origin"], "scraped");
        assert_eq!(json["word_count"], 2);
        assert_eq!(json["product_name"], "laptop stand");
    }
}
