pub mod attempt;
pub mod loader;
pub mod parser;
