//! Pluggable execution backends.
//!
//! A provider receives immutable commands and executes them against a
//! concrete store. Every method has a rejecting default so a backend only
//! implements the commands it can actually honor; the rest surface as
//! typed capability mismatches instead of silent no-ops.

pub mod memory;

pub use memory::{MemoryProvider, MemoryStore};

use crate::{
    collection::{EntityCollection, PagedCollection},
    command::{
        AddCommand, BatchRemoveCommand, BatchUpdateCommand, BulkAddCommand, BulkQueryCommand,
        BulkRemoveCommand, BulkSaveCommand, BulkUpdateCommand, QueryCommand, RemoveCommand,
        SaveCommand, UpdateCommand,
    },
    error::{StoreError, SupportError},
    traits::EntityKind,
};
use async_trait::async_trait;

///
/// EntityProvider
///
/// Execution contract: one method per command kind, each returning the
/// command's declared result type. Implementations must not retry or
/// suppress failures; protocol errors propagate as-is.
///

#[async_trait]
pub trait EntityProvider<E: EntityKind>: Send + Sync {
    /// Stable provider name used in capability diagnostics.
    fn name(&self) -> &'static str;

    async fn execute_add_command(&self, command: &AddCommand<E>) -> Result<E, StoreError> {
        let _ = command;
        Err(SupportError::Command {
            command: "AddCommand",
            provider: self.name(),
        }
        .into())
    }

    async fn execute_bulk_add_command(
        &self,
        command: &BulkAddCommand<E>,
    ) -> Result<EntityCollection<E>, StoreError> {
        let _ = command;
        Err(SupportError::Command {
            command: "BulkAddCommand",
            provider: self.name(),
        }
        .into())
    }

    async fn execute_update_command(&self, command: &UpdateCommand<E>) -> Result<E, StoreError> {
        let _ = command;
        Err(SupportError::Command {
            command: "UpdateCommand",
            provider: self.name(),
        }
        .into())
    }

    async fn execute_bulk_update_command(
        &self,
        command: &BulkUpdateCommand<E>,
    ) -> Result<EntityCollection<E>, StoreError> {
        let _ = command;
        Err(SupportError::Command {
            command: "BulkUpdateCommand",
            provider: self.name(),
        }
        .into())
    }

    async fn execute_batch_update_command(
        &self,
        command: &BatchUpdateCommand<E>,
    ) -> Result<EntityCollection<E>, StoreError> {
        let _ = command;
        Err(SupportError::Command {
            command: "BatchUpdateCommand",
            provider: self.name(),
        }
        .into())
    }

    async fn execute_save_command(&self, command: &SaveCommand<E>) -> Result<E, StoreError> {
        let _ = command;
        Err(SupportError::Command {
            command: "SaveCommand",
            provider: self.name(),
        }
        .into())
    }

    async fn execute_bulk_save_command(
        &self,
        command: &BulkSaveCommand<E>,
    ) -> Result<EntityCollection<E>, StoreError> {
        let _ = command;
        Err(SupportError::Command {
            command: "BulkSaveCommand",
            provider: self.name(),
        }
        .into())
    }

    async fn execute_query_command(
        &self,
        command: &QueryCommand<E>,
    ) -> Result<Option<E>, StoreError> {
        let _ = command;
        Err(SupportError::Command {
            command: "QueryCommand",
            provider: self.name(),
        }
        .into())
    }

    async fn execute_bulk_query_command(
        &self,
        command: &BulkQueryCommand<E>,
    ) -> Result<PagedCollection<E>, StoreError> {
        let _ = command;
        Err(SupportError::Command {
            command: "BulkQueryCommand",
            provider: self.name(),
        }
        .into())
    }

    async fn execute_remove_command(&self, command: &RemoveCommand<E>) -> Result<(), StoreError> {
        let _ = command;
        Err(SupportError::Command {
            command: "RemoveCommand",
            provider: self.name(),
        }
        .into())
    }

    async fn execute_bulk_remove_command(
        &self,
        command: &BulkRemoveCommand<E>,
    ) -> Result<(), StoreError> {
        let _ = command;
        Err(SupportError::Command {
            command: "BulkRemoveCommand",
            provider: self.name(),
        }
        .into())
    }

    async fn execute_batch_remove_command(
        &self,
        command: &BatchRemoveCommand<E>,
    ) -> Result<(), StoreError> {
        let _ = command;
        Err(SupportError::Command {
            command: "BatchRemoveCommand",
            provider: self.name(),
        }
        .into())
    }
}
