pub mod canonical;
pub mod engine;
pub mod mode;
pub mod stats;
