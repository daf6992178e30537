use crate::{
    collection::PagedCollection,
    command::builder::{
        AddCommandBuilder, BatchRemoveCommandBuilder, BatchUpdateCommandBuilder,
        BulkAddCommandBuilder, BulkRemoveCommandBuilder, BulkSaveCommandBuilder,
        BulkUpdateCommandBuilder, QueryBuilder, RemoveCommandBuilder, SaveCommandBuilder,
        UpdateCommandBuilder,
    },
    error::StoreError,
    expr::FilterExpr,
    provider::EntityProvider,
    traits::EntityKind,
};
use std::marker::PhantomData;

///
/// EntitySet
///
/// Front door for one entity type bound to one provider: hands out the
/// fluent query builder and the write builders. Holds no state of its own.
///

pub struct EntitySet<'a, E, P>
where
    E: EntityKind,
    P: EntityProvider<E> + ?Sized,
{
    provider: &'a P,
    _marker: PhantomData<E>,
}

impl<'a, E, P> EntitySet<'a, E, P>
where
    E: EntityKind,
    P: EntityProvider<E> + ?Sized,
{
    #[must_use]
    pub const fn new(provider: &'a P) -> Self {
        Self {
            provider,
            _marker: PhantomData,
        }
    }

    // ------------------------------------------------------------------
    // Browse
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn query(&self) -> QueryBuilder<'a, E, P> {
        QueryBuilder::new(self.provider)
    }

    /// Shorthand: start a query from one filter expression.
    #[must_use]
    pub fn filter(&self, expr: FilterExpr) -> QueryBuilder<'a, E, P> {
        self.query().filter(expr)
    }

    /// Fetch every stored entity.
    pub async fn find_all(&self) -> Result<PagedCollection<E>, StoreError> {
        self.query().find_all().await
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn add(&self) -> AddCommandBuilder<'a, E, P> {
        AddCommandBuilder::new(self.provider)
    }

    #[must_use]
    pub const fn update(&self) -> UpdateCommandBuilder<'a, E, P> {
        UpdateCommandBuilder::new(self.provider)
    }

    #[must_use]
    pub const fn save(&self) -> SaveCommandBuilder<'a, E, P> {
        SaveCommandBuilder::new(self.provider)
    }

    #[must_use]
    pub const fn remove(&self) -> RemoveCommandBuilder<'a, E, P> {
        RemoveCommandBuilder::new(self.provider)
    }

    #[must_use]
    pub const fn bulk_add(&self) -> BulkAddCommandBuilder<'a, E, P> {
        BulkAddCommandBuilder::new(self.provider)
    }

    #[must_use]
    pub const fn bulk_update(&self) -> BulkUpdateCommandBuilder<'a, E, P> {
        BulkUpdateCommandBuilder::new(self.provider)
    }

    #[must_use]
    pub const fn bulk_save(&self) -> BulkSaveCommandBuilder<'a, E, P> {
        BulkSaveCommandBuilder::new(self.provider)
    }

    #[must_use]
    pub const fn bulk_remove(&self) -> BulkRemoveCommandBuilder<'a, E, P> {
        BulkRemoveCommandBuilder::new(self.provider)
    }

    #[must_use]
    pub const fn batch_update(&self) -> BatchUpdateCommandBuilder<'a, E, P> {
        BatchUpdateCommandBuilder::new(self.provider)
    }

    #[must_use]
    pub const fn batch_remove(&self) -> BatchRemoveCommandBuilder<'a, E, P> {
        BatchRemoveCommandBuilder::new(self.provider)
    }
}
