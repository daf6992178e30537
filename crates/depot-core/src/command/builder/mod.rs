//! Fluent command builders.
//!
//! Builders accumulate expressions or payloads, then freeze them into an
//! immutable command (`build`) or build-and-delegate in one step through
//! their terminal methods. A malformed accumulation never produces a
//! command.

mod batch;
mod query;
mod write;

pub use batch::{BatchRemoveCommandBuilder, BatchUpdateCommandBuilder};
pub use query::QueryBuilder;
pub use write::{
    AddCommandBuilder, BulkAddCommandBuilder, BulkRemoveCommandBuilder, BulkSaveCommandBuilder,
    BulkUpdateCommandBuilder, RemoveCommandBuilder, SaveCommandBuilder, UpdateCommandBuilder,
};
