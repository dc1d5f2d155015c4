pub mod config;
pub mod data_mapping;
pub mod errors;
pub mod ingestor;
pub mod models;
pub mod pipeline;
pub mod proxy;
pub mod sources;
pub mod utils;
