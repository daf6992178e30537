//! Depot — a typed, backend-agnostic entity command and query layer.
//!
//! Client code describes data operations as immutable commands and
//! expression trees; a pluggable [`EntityProvider`](depot_core::provider::EntityProvider)
//! executes them. Two reference providers ship in-tree: the in-memory
//! store from `depot-core` and the JSON:API remote store from
//! `depot-jsonapi` (behind the `jsonapi` feature).

pub use depot_core::{
    collection, command, error, eval, expr, model, patch, path, provider, traits, value,
};

#[cfg(feature = "jsonapi")]
pub use depot_jsonapi as jsonapi;

///
/// Prelude
///
/// Domain vocabulary plus the reference providers.
///

pub mod prelude {
    pub use depot_core::prelude::*;
    pub use depot_core::provider::{MemoryProvider, MemoryStore};

    #[cfg(feature = "jsonapi")]
    pub use depot_jsonapi::{JsonApiConfig, JsonApiProvider};
}
