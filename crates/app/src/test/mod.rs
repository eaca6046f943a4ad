//! Shared test infrastructure.

mod context;

pub use context::TestContext;
