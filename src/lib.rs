pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use core::{
    composer::TemplateComposer,
    engine::BlogEngine,
    generator::{rng_from_seed, BlogGenerationService},
    keywords::{HttpClientConfig, SuggestionKeywordSource},
    pipeline::BlogPipeline,
};
pub use domain::model::{BlogPost, GenerationReport, KeywordOrigin, KeywordSet, SavedPost};
pub use utils::error::{Result, SeoBlogError};
