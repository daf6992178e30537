//! Immutable command intents and the builders that assemble them.
//!
//! A command is pure data: entity payload and/or accumulated expressions.
//! Execution happens only when a command is delegated to an
//! [`EntityProvider`](crate::provider::EntityProvider).

pub mod builder;
pub mod set;

pub use builder::{
    AddCommandBuilder, BatchRemoveCommandBuilder, BatchUpdateCommandBuilder, BulkAddCommandBuilder,
    BulkRemoveCommandBuilder, BulkSaveCommandBuilder, BulkUpdateCommandBuilder, QueryBuilder,
    RemoveCommandBuilder, SaveCommandBuilder, UpdateCommandBuilder,
};
pub use set::EntitySet;

use crate::{
    collection::{EntityCollection, PagedCollection},
    error::StoreError,
    expr::{FilterExpr, IncludeExpr, PaginateExpr, SortExpr},
    patch::EntityPatch,
    provider::EntityProvider,
    traits::EntityKind,
};
use std::marker::PhantomData;

///
/// QuerySpec
///
/// Immutable bundle of browse expressions, frozen out of a builder.
/// Absent expressions mean "no constraint".
///

#[derive(Clone, Debug, Default)]
pub struct QuerySpec {
    pub filter: Option<FilterExpr>,
    pub sort: Option<SortExpr>,
    pub include: Option<IncludeExpr>,
    pub paginate: Option<PaginateExpr>,
}

///
/// AddCommand
///

#[derive(Clone, Debug)]
pub struct AddCommand<E: EntityKind> {
    pub entity: E,
}

impl<E: EntityKind> AddCommand<E> {
    #[must_use]
    pub const fn new(entity: E) -> Self {
        Self { entity }
    }

    pub async fn delegate<P>(&self, provider: &P) -> Result<E, StoreError>
    where
        P: EntityProvider<E> + ?Sized,
    {
        provider.execute_add_command(self).await
    }
}

///
/// BulkAddCommand
///

#[derive(Clone, Debug)]
pub struct BulkAddCommand<E: EntityKind> {
    pub entities: EntityCollection<E>,
}

impl<E: EntityKind> BulkAddCommand<E> {
    #[must_use]
    pub const fn new(entities: EntityCollection<E>) -> Self {
        Self { entities }
    }

    pub async fn delegate<P>(&self, provider: &P) -> Result<EntityCollection<E>, StoreError>
    where
        P: EntityProvider<E> + ?Sized,
    {
        provider.execute_bulk_add_command(self).await
    }
}

///
/// UpdateCommand
///

#[derive(Clone, Debug)]
pub struct UpdateCommand<E: EntityKind> {
    pub entity: E,
}

impl<E: EntityKind> UpdateCommand<E> {
    #[must_use]
    pub const fn new(entity: E) -> Self {
        Self { entity }
    }

    pub async fn delegate<P>(&self, provider: &P) -> Result<E, StoreError>
    where
        P: EntityProvider<E> + ?Sized,
    {
        provider.execute_update_command(self).await
    }
}

///
/// BulkUpdateCommand
///

#[derive(Clone, Debug)]
pub struct BulkUpdateCommand<E: EntityKind> {
    pub entities: EntityCollection<E>,
}

impl<E: EntityKind> BulkUpdateCommand<E> {
    #[must_use]
    pub const fn new(entities: EntityCollection<E>) -> Self {
        Self { entities }
    }

    pub async fn delegate<P>(&self, provider: &P) -> Result<EntityCollection<E>, StoreError>
    where
        P: EntityProvider<E> + ?Sized,
    {
        provider.execute_bulk_update_command(self).await
    }
}

///
/// BatchUpdateCommand
///
/// Carries only a patch and expressions — no materialized entities. Meant
/// for providers that can translate the description into a native bulk
/// mutation.
///

#[derive(Clone, Debug)]
pub struct BatchUpdateCommand<E: EntityKind> {
    pub patch: EntityPatch,
    pub spec: QuerySpec,
    _marker: PhantomData<E>,
}

impl<E: EntityKind> BatchUpdateCommand<E> {
    #[must_use]
    pub const fn new(patch: EntityPatch, spec: QuerySpec) -> Self {
        Self {
            patch,
            spec,
            _marker: PhantomData,
        }
    }

    pub async fn delegate<P>(&self, provider: &P) -> Result<EntityCollection<E>, StoreError>
    where
        P: EntityProvider<E> + ?Sized,
    {
        provider.execute_batch_update_command(self).await
    }
}

///
/// SaveCommand
///

#[derive(Clone, Debug)]
pub struct SaveCommand<E: EntityKind> {
    pub entity: E,
}

impl<E: EntityKind> SaveCommand<E> {
    #[must_use]
    pub const fn new(entity: E) -> Self {
        Self { entity }
    }

    pub async fn delegate<P>(&self, provider: &P) -> Result<E, StoreError>
    where
        P: EntityProvider<E> + ?Sized,
    {
        provider.execute_save_command(self).await
    }
}

///
/// BulkSaveCommand
///

#[derive(Clone, Debug)]
pub struct BulkSaveCommand<E: EntityKind> {
    pub entities: EntityCollection<E>,
}

impl<E: EntityKind> BulkSaveCommand<E> {
    #[must_use]
    pub const fn new(entities: EntityCollection<E>) -> Self {
        Self { entities }
    }

    pub async fn delegate<P>(&self, provider: &P) -> Result<EntityCollection<E>, StoreError>
    where
        P: EntityProvider<E> + ?Sized,
    {
        provider.execute_bulk_save_command(self).await
    }
}

///
/// QueryCommand
///
/// Single-entity browse: the same expression bundle as a bulk query with
/// an implicit `limit = 1` merged into the pagination.
///

#[derive(Clone, Debug)]
pub struct QueryCommand<E: EntityKind> {
    pub spec: QuerySpec,
    _marker: PhantomData<E>,
}

impl<E: EntityKind> QueryCommand<E> {
    #[must_use]
    pub fn new(mut spec: QuerySpec) -> Self {
        spec.paginate = Some(match spec.paginate.take() {
            Some(paginate) => paginate.merge(PaginateExpr::limit(1)),
            None => PaginateExpr::limit(1),
        });

        Self {
            spec,
            _marker: PhantomData,
        }
    }

    pub async fn delegate<P>(&self, provider: &P) -> Result<Option<E>, StoreError>
    where
        P: EntityProvider<E> + ?Sized,
    {
        provider.execute_query_command(self).await
    }
}

///
/// BulkQueryCommand
///

#[derive(Clone, Debug)]
pub struct BulkQueryCommand<E: EntityKind> {
    pub spec: QuerySpec,
    _marker: PhantomData<E>,
}

impl<E: EntityKind> BulkQueryCommand<E> {
    #[must_use]
    pub const fn new(spec: QuerySpec) -> Self {
        Self {
            spec,
            _marker: PhantomData,
        }
    }

    pub async fn delegate<P>(&self, provider: &P) -> Result<PagedCollection<E>, StoreError>
    where
        P: EntityProvider<E> + ?Sized,
    {
        provider.execute_bulk_query_command(self).await
    }
}

///
/// RemoveCommand
///

#[derive(Clone, Debug)]
pub struct RemoveCommand<E: EntityKind> {
    pub entity: E,
}

impl<E: EntityKind> RemoveCommand<E> {
    #[must_use]
    pub const fn new(entity: E) -> Self {
        Self { entity }
    }

    pub async fn delegate<P>(&self, provider: &P) -> Result<(), StoreError>
    where
        P: EntityProvider<E> + ?Sized,
    {
        provider.execute_remove_command(self).await
    }
}

///
/// BulkRemoveCommand
///

#[derive(Clone, Debug)]
pub struct BulkRemoveCommand<E: EntityKind> {
    pub entities: EntityCollection<E>,
}

impl<E: EntityKind> BulkRemoveCommand<E> {
    #[must_use]
    pub const fn new(entities: EntityCollection<E>) -> Self {
        Self { entities }
    }

    pub async fn delegate<P>(&self, provider: &P) -> Result<(), StoreError>
    where
        P: EntityProvider<E> + ?Sized,
    {
        provider.execute_bulk_remove_command(self).await
    }
}

///
/// BatchRemoveCommand
///
/// Removal described purely by expressions, without materializing the
/// affected entities first.
///

#[derive(Clone, Debug)]
pub struct BatchRemoveCommand<E: EntityKind> {
    pub spec: QuerySpec,
    _marker: PhantomData<E>,
}

impl<E: EntityKind> BatchRemoveCommand<E> {
    #[must_use]
    pub const fn new(spec: QuerySpec) -> Self {
        Self {
            spec,
            _marker: PhantomData,
        }
    }

    pub async fn delegate<P>(&self, provider: &P) -> Result<(), StoreError>
    where
        P: EntityProvider<E> + ?Sized,
    {
        provider.execute_batch_remove_command(self).await
    }
}

///
/// TESTS
///
