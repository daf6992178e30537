use crate::{
    collection::PagedCollection,
    command::{BulkQueryCommand, QueryCommand, QuerySpec},
    error::{PathError, StoreError},
    expr::{FilterExpr, IncludeExpr, PaginateExpr, SortExpr},
    path::PropertyPath,
    provider::EntityProvider,
    traits::EntityKind,
};
use std::marker::PhantomData;

///
/// QueryBuilder
///
/// Provider-bound fluent browse builder.
///
/// Accumulation rules:
/// - repeated `filter` calls AND-combine with the accumulated filter
/// - `sort_by_*` replaces the whole sort chain; `then_sort_by_*` chains
/// - `include`/`include_collection` chain sibling root-level includes;
///   `then_include` drills into the most recent one
/// - pagination calls merge within one strategy and replace across
///   strategies
///
/// Field paths are resolved eagerly against the entity model, so an
/// undeclared property fails the call that names it.
///

pub struct QueryBuilder<'a, E, P>
where
    E: EntityKind,
    P: EntityProvider<E> + ?Sized,
{
    provider: &'a P,
    spec: QuerySpec,
    _marker: PhantomData<E>,
}

impl<E, P> std::fmt::Debug for QueryBuilder<'_, E, P>
where
    E: EntityKind,
    P: EntityProvider<E> + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("spec", &self.spec)
            .finish()
    }
}

impl<'a, E, P> QueryBuilder<'a, E, P>
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

    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    /// Add a filter, implicitly AND-combining with any accumulated one.
    #[must_use]
    pub fn filter(mut self, expr: FilterExpr) -> Self {
        self.spec.filter = Some(match self.spec.filter.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }

    // ------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------

    /// Start a fresh ascending sort, replacing any accumulated chain.
    pub fn sort_by_asc(mut self, path: &str) -> Result<Self, StoreError> {
        let path = PropertyPath::resolve(E::MODEL, path)?;
        self.spec.sort = Some(SortExpr::asc(path));
        Ok(self)
    }

    /// Start a fresh descending sort, replacing any accumulated chain.
    pub fn sort_by_desc(mut self, path: &str) -> Result<Self, StoreError> {
        let path = PropertyPath::resolve(E::MODEL, path)?;
        self.spec.sort = Some(SortExpr::desc(path));
        Ok(self)
    }

    /// Chain an ascending tie-break key onto the accumulated sort.
    pub fn then_sort_by_asc(mut self, path: &str) -> Result<Self, StoreError> {
        let path = PropertyPath::resolve(E::MODEL, path)?;
        self.spec.sort = Some(match self.spec.sort.take() {
            Some(current) => current.then_asc(path),
            None => SortExpr::asc(path),
        });
        Ok(self)
    }

    /// Chain a descending tie-break key onto the accumulated sort.
    pub fn then_sort_by_desc(mut self, path: &str) -> Result<Self, StoreError> {
        let path = PropertyPath::resolve(E::MODEL, path)?;
        self.spec.sort = Some(match self.spec.sort.take() {
            Some(current) => current.then_desc(path),
            None => SortExpr::desc(path),
        });
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Eager loading
    // ------------------------------------------------------------------

    /// Eager-load a to-one relation (root-level include).
    pub fn include(mut self, relation: &str) -> Result<Self, StoreError> {
        let path = PropertyPath::resolve(E::MODEL, relation)?;
        self.spec.include = Some(Self::chain_root_include(self.spec.include.take(), path));
        Ok(self)
    }

    /// Eager-load a collection relation (root-level include).
    ///
    /// The relation is resolved through its single element type argument;
    /// a collection without element metadata cannot be eager-loaded.
    pub fn include_collection(mut self, relation: &str) -> Result<Self, StoreError> {
        let path = PropertyPath::resolve(E::MODEL, relation)?;

        if path.field().kind.is_collection() && path.field().kind.target_entity().is_none() {
            return Err(PathError::GenericMetadataNotFound {
                path: path.dotted(),
            }
            .into());
        }

        self.spec.include = Some(Self::chain_root_include(self.spec.include.take(), path));
        Ok(self)
    }

    /// Drill one relation deeper into the most recently added include.
    pub fn then_include(mut self, relation: &str) -> Result<Self, StoreError> {
        self.spec.include = Some(match self.spec.include.take() {
            Some(current) => {
                let path = current.path.extend(relation)?;
                current.then(path)
            }
            None => IncludeExpr::relation(E::MODEL, PropertyPath::resolve(E::MODEL, relation)?),
        });
        Ok(self)
    }

    fn chain_root_include(current: Option<IncludeExpr>, path: PropertyPath) -> IncludeExpr {
        match current {
            Some(existing) => existing.and_relation(E::MODEL, path),
            None => IncludeExpr::relation(E::MODEL, path),
        }
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Merge one pagination expression into the accumulated spec.
    #[must_use]
    pub fn paginate(mut self, paginate: PaginateExpr) -> Self {
        self.spec.paginate = Some(match self.spec.paginate.take() {
            Some(current) => current.merge(paginate),
            None => paginate,
        });
        self
    }

    #[must_use]
    pub fn offset(self, offset: u64) -> Self {
        self.paginate(PaginateExpr::offset(offset))
    }

    #[must_use]
    pub fn limit(self, limit: u64) -> Self {
        self.paginate(PaginateExpr::limit(limit))
    }

    #[must_use]
    pub fn offset_limit(self, offset: u64, limit: u64) -> Self {
        self.paginate(PaginateExpr::offset_limit(offset, limit))
    }

    #[must_use]
    pub fn page(self, page: u64) -> Self {
        self.paginate(PaginateExpr::page(page))
    }

    #[must_use]
    pub fn size(self, size: u64) -> Self {
        self.paginate(PaginateExpr::size(size))
    }

    #[must_use]
    pub fn page_size(self, page: u64, size: u64) -> Self {
        self.paginate(PaginateExpr::page_size(page, size))
    }

    #[must_use]
    pub fn take(self, take: u64) -> Self {
        self.paginate(PaginateExpr::take(take))
    }

    #[must_use]
    pub fn take_after_cursor(self, take: u64, after: impl Into<String>) -> Self {
        self.paginate(PaginateExpr::take_after_cursor(take, after))
    }

    #[must_use]
    pub fn take_before_cursor(self, take: u64, before: impl Into<String>) -> Self {
        self.paginate(PaginateExpr::take_before_cursor(take, before))
    }

    #[must_use]
    pub fn take_between_cursors(
        self,
        take: u64,
        after: impl Into<String>,
        before: impl Into<String>,
    ) -> Self {
        self.paginate(PaginateExpr::take_between_cursors(take, after, before))
    }

    // ------------------------------------------------------------------
    // Terminals
    // ------------------------------------------------------------------

    /// Freeze the accumulated expressions into a bulk query command.
    #[must_use]
    pub fn build(self) -> BulkQueryCommand<E> {
        BulkQueryCommand::new(self.spec)
    }

    /// Freeze into a single-entity query command (implicit limit 1).
    #[must_use]
    pub fn build_one(self) -> QueryCommand<E> {
        QueryCommand::new(self.spec)
    }

    /// Execute and return the matching page.
    pub async fn find_all(self) -> Result<PagedCollection<E>, StoreError> {
        let provider = self.provider;
        BulkQueryCommand::new(self.spec).delegate(provider).await
    }

    /// Execute and return the first match, or the absent sentinel.
    pub async fn find_one(self) -> Result<Option<E>, StoreError> {
        let provider = self.provider;
        QueryCommand::new(self.spec).delegate(provider).await
    }

    /// Execute and require one match.
    pub async fn find_one_or_fail(self) -> Result<E, StoreError> {
        self.find_one()
            .await?
            .ok_or(StoreError::EntityNotFound {
                entity: E::MODEL.entity_name,
            })
    }

    /// Execute and require a non-empty page.
    pub async fn find_or_fail(self) -> Result<PagedCollection<E>, StoreError> {
        let page = self.find_all().await?;
        if page.items().is_empty() {
            return Err(StoreError::EntityNotFound {
                entity: E::MODEL.entity_name,
            });
        }

        Ok(page)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::SortDirection;
    use crate::provider::{MemoryProvider, MemoryStore};
    use crate::test_fixtures::{POST_MODEL, Post};
    use std::sync::Arc;

    fn provider() -> MemoryProvider {
        MemoryProvider::new(Arc::new(MemoryStore::new()))
    }

    fn builder(provider: &MemoryProvider) -> QueryBuilder<'_, Post, MemoryProvider> {
        QueryBuilder::new(provider)
    }

    fn title_eq(value: &str) -> FilterExpr {
        FilterExpr::eq(PropertyPath::resolve(&POST_MODEL, "title").unwrap(), value)
    }

    #[test]
    fn repeated_filters_and_combine() {
        let provider = provider();
        let command = builder(&provider)
            .filter(title_eq("a"))
            .filter(title_eq("b"))
            .build();

        match command.spec.filter {
            Some(FilterExpr::And(children)) => assert_eq!(children.len(), 2),
            other => panic!("expected And-combined filter, got {other:?}"),
        }
    }

    #[test]
    fn sort_by_replaces_and_then_sort_chains() {
        let provider = provider();
        let command = builder(&provider)
            .sort_by_asc("title")
            .unwrap()
            .sort_by_desc("priority")
            .unwrap()
            .then_sort_by_asc("title")
            .unwrap()
            .build();

        let sort = command.spec.sort.unwrap();
        // head is the tie-break key; its parent is the replacing desc sort
        assert_eq!(sort.path.dotted(), "title");
        assert_eq!(sort.direction, SortDirection::Asc);

        let parent = sort.parent.as_deref().unwrap();
        assert_eq!(parent.path.dotted(), "priority");
        assert_eq!(parent.direction, SortDirection::Desc);
        assert!(parent.parent.is_none());
    }

    #[test]
    fn include_chains_and_marks_root_levels() {
        let provider = provider();
        let command = builder(&provider)
            .include("author")
            .unwrap()
            .then_include("name")
            .unwrap()
            .include_collection("reviews")
            .unwrap()
            .build();

        let include = command.spec.include.unwrap();
        // most recent include is the root-level collection include
        assert!(include.is_root_level());
        assert_eq!(include.path.dotted(), "reviews");

        let nested = include.parent.as_deref().unwrap();
        assert!(!nested.is_root_level());
        assert_eq!(nested.path.dotted(), "author.name");
    }

    #[test]
    fn include_collection_requires_element_metadata() {
        let provider = provider();
        let err = builder(&provider).include_collection("attachments").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Path(PathError::GenericMetadataNotFound { .. })
        ));
    }

    #[test]
    fn undeclared_sort_field_fails_the_call_that_names_it() {
        let provider = provider();
        let err = builder(&provider).sort_by_asc("missing").unwrap_err();
        assert!(matches!(err, StoreError::Path(PathError::NotDeclared { .. })));
    }

    #[test]
    fn pagination_calls_merge_within_a_strategy() {
        let provider = provider();
        let command = builder(&provider).offset(4).limit(2).build();
        assert_eq!(
            command.spec.paginate,
            Some(PaginateExpr::offset_limit(4, 2))
        );
    }
}
