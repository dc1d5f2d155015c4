//! Rule-driven rewriting of filtered channel records

pub mod engine;

pub use engine::{DataMappingEngine, MappingStats};
