pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod loader;
pub mod logging;
pub mod normalize;
pub mod storage;
pub mod tagger;
pub mod types;
