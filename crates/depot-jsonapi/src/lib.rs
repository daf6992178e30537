//! JSON:API backend for Depot: compiles expression trees to query strings,
//! entity graphs to/from the document format, and executes commands over
//! HTTP against a JSON:API server.

pub mod codec;
pub mod document;
pub mod provider;
pub mod query;

pub use provider::{JsonApiConfig, JsonApiProvider};

// test
#[cfg(test)]
pub(crate) mod test_fixtures;
