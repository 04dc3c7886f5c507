pub mod composer;
pub mod engine;
pub mod generator;
pub mod keywords;
pub mod pipeline;

pub use crate::domain::model::{
    BlogPost, GenerationReport, KeywordOrigin, KeywordSet, SavedPost,
};
pub use crate::domain::ports::{ConfigProvider, KeywordSource, Pipeline, Storage};
pub use crate::utils::error::Result;
