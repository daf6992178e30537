use crate::{
    collection::EntityCollection,
    command::{BatchRemoveCommand, BatchUpdateCommand, QuerySpec},
    error::StoreError,
    expr::{FilterExpr, PaginateExpr, SortExpr},
    patch::EntityPatch,
    path::PropertyPath,
    provider::EntityProvider,
    traits::EntityKind,
    value::Value,
};
use std::marker::PhantomData;

///
/// BatchUpdateCommandBuilder
///
/// Accumulates a partial-entity patch plus browse expressions, then
/// freezes them into a [`BatchUpdateCommand`]. No entities are
/// materialized: the description itself is the payload.
///

pub struct BatchUpdateCommandBuilder<'a, E, P>
where
    E: EntityKind,
    P: EntityProvider<E> + ?Sized,
{
    provider: &'a P,
    patch: EntityPatch,
    spec: QuerySpec,
    _marker: PhantomData<E>,
}

impl<E, P> std::fmt::Debug for BatchUpdateCommandBuilder<'_, E, P>
where
    E: EntityKind,
    P: EntityProvider<E> + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchUpdateCommandBuilder")
            .field("patch", &self.patch)
            .field("spec", &self.spec)
            .finish()
    }
}

impl<'a, E, P> BatchUpdateCommandBuilder<'a, E, P>
where
    E: EntityKind,
    P: EntityProvider<E> + ?Sized,
{
    pub(crate) const fn new(provider: &'a P) -> Self {
        Self {
            provider,
            patch: EntityPatch::new(),
            spec: QuerySpec {
                filter: None,
                sort: None,
                include: None,
                paginate: None,
            },
            _marker: PhantomData,
        }
    }

    /// Assign one root-level field in the patch.
    pub fn set(mut self, path: &str, value: impl Into<Value>) -> Result<Self, StoreError> {
        let path = PropertyPath::resolve(E::MODEL, path)?;
        self.patch = self.patch.try_set(&path, value)?;
        Ok(self)
    }

    /// Add a filter, implicitly AND-combining with any accumulated one.
    #[must_use]
    pub fn filter(mut self, expr: FilterExpr) -> Self {
        self.spec.filter = Some(match self.spec.filter.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }

    /// Replace the sort chain.
    pub fn sort_by_asc(mut self, path: &str) -> Result<Self, StoreError> {
        let path = PropertyPath::resolve(E::MODEL, path)?;
        self.spec.sort = Some(SortExpr::asc(path));
        Ok(self)
    }

    /// Merge one pagination expression into the accumulated spec.
    #[must_use]
    pub fn paginate(mut self, paginate: PaginateExpr) -> Self {
        self.spec.paginate = Some(match self.spec.paginate.take() {
            Some(current) => current.merge(paginate),
            None => paginate,
        });
        self
    }

    /// Freeze the accumulated patch and expressions into a command.
    #[must_use]
    pub fn build(self) -> BatchUpdateCommand<E> {
        BatchUpdateCommand::new(self.patch, self.spec)
    }

    /// Build and delegate to the provider.
    pub async fn batch_update(self) -> Result<EntityCollection<E>, StoreError> {
        let provider = self.provider;
        BatchUpdateCommand::new(self.patch, self.spec)
            .delegate(provider)
            .await
    }
}

///
/// BatchRemoveCommandBuilder
///
/// Accumulates browse expressions describing the removal set, then
/// freezes them into a [`BatchRemoveCommand`].
///

pub struct BatchRemoveCommandBuilder<'a, E, P>
where
    E: EntityKind,
    P: EntityProvider<E> + ?Sized,
{
    provider: &'a P,
    spec: QuerySpec,
    _marker: PhantomData<E>,
}

impl<'a, E, P> BatchRemoveCommandBuilder<'a, E, P>
where
    E: EntityKind,
    P: EntityProvider<E> + ?Sized,
{
    pub(crate) const fn new(provider: &'a P) -> Self {
        Self {
            provider,
            spec: QuerySpec {
                filter: None,
                sort: None,
                include: None,
                paginate: None,
            },
            _marker: PhantomData,
        }
    }

    /// Add a filter, implicitly AND-combining with any accumulated one.
    #[must_use]
    pub fn filter(mut self, expr: FilterExpr) -> Self {
        self.spec.filter = Some(match self.spec.filter.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }

    /// Merge one pagination expression into the accumulated spec.
    #[must_use]
    pub fn paginate(mut self, paginate: PaginateExpr) -> Self {
        self.spec.paginate = Some(match self.spec.paginate.take() {
            Some(current) => current.merge(paginate),
            None => paginate,
        });
        self
    }

    /// Freeze the accumulated expressions into a command.
    #[must_use]
    pub fn build(self) -> BatchRemoveCommand<E> {
        BatchRemoveCommand::new(self.spec)
    }

    /// Build and delegate to the provider.
    pub async fn batch_remove(self) -> Result<(), StoreError> {
        let provider = self.provider;
        BatchRemoveCommand::new(self.spec).delegate(provider).await
    }
}

///
/// TESTS
///
