//! Playlist classification and output generation

pub mod filter_engine;
pub mod generator;

pub use filter_engine::{FilterDecision, FilterEngine};
pub use generator::PlaylistGenerator;
