pub mod build;
pub mod loo;

// Re-export command functions for convenience
pub use build::{build_model, BuildModelParams};
pub use loo::loo_test;
