use crate::{
    collection::{EntityCollection, PagedCollection},
    command::{
        AddCommand, BatchRemoveCommand, BatchUpdateCommand, BulkAddCommand, BulkQueryCommand,
        BulkRemoveCommand, BulkSaveCommand, BulkUpdateCommand, QueryCommand, RemoveCommand,
        SaveCommand, UpdateCommand,
    },
    error::{PathError, StoreError},
    eval,
    provider::EntityProvider,
    traits::EntityKind,
    value::Value,
};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};
use tokio::sync::RwLock;

///
/// MemoryStore
///
/// Explicit shared store: one ordered shelf per entity type, keyed by type
/// identity. Passed into providers so independent provider instances never
/// share state implicitly.
///

#[derive(Default)]
pub struct MemoryStore {
    shelves: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the shelf for one entity type.
    pub(crate) async fn snapshot<E: EntityKind>(&self) -> Vec<E> {
        let shelves = self.shelves.read().await;
        shelves
            .get(&TypeId::of::<E>())
            .and_then(|shelf| shelf.downcast_ref::<Vec<E>>())
            .cloned()
            .unwrap_or_default()
    }

    /// Run one closure over the mutable shelf for one entity type.
    pub(crate) async fn with_shelf<E, T, F>(&self, apply: F) -> T
    where
        E: EntityKind,
        F: FnOnce(&mut Vec<E>) -> T,
    {
        let mut shelves = self.shelves.write().await;
        let shelf = shelves
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<E>::new()));
        let shelf = shelf
            .downcast_mut::<Vec<E>>()
            .expect("shelves are keyed by TypeId");

        apply(shelf)
    }
}

///
/// MemoryProvider
///
/// Reference in-memory backend. Single-shot operations over the injected
/// store; no caching, no retries, no cross-command state.
///

#[derive(Clone)]
pub struct MemoryProvider {
    store: Arc<MemoryStore>,
}

impl MemoryProvider {
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    fn key_matches<E: EntityKind>(entity: &E, key: &Value) -> bool {
        entity.key().is_ok_and(|candidate| candidate.equals(key))
    }

    async fn browse<E: EntityKind>(
        &self,
        command: &BulkQueryCommand<E>,
    ) -> Result<PagedCollection<E>, StoreError> {
        let mut entities = self.store.snapshot::<E>().await;

        if let Some(filter) = &command.spec.filter {
            entities.retain(|entity| eval::filter::matches(filter, entity));
        }
        if let Some(sort) = &command.spec.sort {
            entities.sort_by(|a, b| eval::sort::compare(sort, a, b));
        }

        // include expressions have no in-memory interpretation: related
        // entities are already materialised on the instances themselves
        let total = entities.len() as u64;
        if let Some(paginate) = &command.spec.paginate {
            let window = eval::paginate::window(paginate, entities.len())?;
            entities = entities[window].to_vec();
        }

        log::debug!(
            "memory: browse over {} returned {} of {} stored",
            E::MODEL.entity_name,
            entities.len(),
            total,
        );

        Ok(PagedCollection::new(EntityCollection::from(entities)).with_total(total))
    }
}

#[async_trait]
impl<E: EntityKind> EntityProvider<E> for MemoryProvider {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn execute_add_command(&self, command: &AddCommand<E>) -> Result<E, StoreError> {
        let entity = command.entity.clone();
        self.store
            .with_shelf::<E, _, _>(|shelf| shelf.push(entity.clone()))
            .await;

        log::debug!("memory: added one {} entity", E::MODEL.entity_name);
        Ok(entity)
    }

    async fn execute_bulk_add_command(
        &self,
        command: &BulkAddCommand<E>,
    ) -> Result<EntityCollection<E>, StoreError> {
        let additions = command
            .entities
            .iter()
            .cloned()
            .map(|entity| async move { AddCommand::new(entity).delegate(self).await });

        let added = try_join_all(additions).await?;
        Ok(EntityCollection::from(added))
    }

    async fn execute_update_command(&self, command: &UpdateCommand<E>) -> Result<E, StoreError> {
        let key = command.entity.key()?;
        let entity = command.entity.clone();

        let replaced = self
            .store
            .with_shelf::<E, _, _>(|shelf| {
                for slot in shelf.iter_mut() {
                    if Self::key_matches(slot, &key) {
                        *slot = entity.clone();
                        return true;
                    }
                }
                false
            })
            .await;

        if replaced {
            Ok(entity)
        } else {
            Err(StoreError::EntityNotFound {
                entity: E::MODEL.entity_name,
            })
        }
    }

    async fn execute_bulk_update_command(
        &self,
        command: &BulkUpdateCommand<E>,
    ) -> Result<EntityCollection<E>, StoreError> {
        let updates = command
            .entities
            .iter()
            .cloned()
            .map(|entity| async move { UpdateCommand::new(entity).delegate(self).await });

        let updated = try_join_all(updates).await?;
        Ok(EntityCollection::from(updated))
    }

    async fn execute_batch_update_command(
        &self,
        command: &BatchUpdateCommand<E>,
    ) -> Result<EntityCollection<E>, StoreError> {
        // reference semantics: the patch applies to the bare collection
        let patch = command.patch.clone();
        let patched = self
            .store
            .with_shelf::<E, _, _>(|shelf| {
                let mut patched = Vec::with_capacity(shelf.len());
                for slot in shelf.iter_mut() {
                    patch.apply_to(slot)?;
                    patched.push(slot.clone());
                }
                Ok::<_, PathError>(patched)
            })
            .await?;

        log::debug!(
            "memory: batch-updated {} {} entities",
            patched.len(),
            E::MODEL.entity_name,
        );
        Ok(EntityCollection::from(patched))
    }

    async fn execute_save_command(&self, command: &SaveCommand<E>) -> Result<E, StoreError> {
        let key = command.entity.key()?;
        let entity = command.entity.clone();

        self.store
            .with_shelf::<E, _, _>(|shelf| {
                for slot in shelf.iter_mut() {
                    if Self::key_matches(slot, &key) {
                        *slot = entity.clone();
                        return;
                    }
                }
                // save target not present yet: fall back to append
                shelf.push(entity.clone());
            })
            .await;

        Ok(entity)
    }

    async fn execute_bulk_save_command(
        &self,
        command: &BulkSaveCommand<E>,
    ) -> Result<EntityCollection<E>, StoreError> {
        let saves = command
            .entities
            .iter()
            .cloned()
            .map(|entity| async move { SaveCommand::new(entity).delegate(self).await });

        let saved = try_join_all(saves).await?;
        Ok(EntityCollection::from(saved))
    }

    async fn execute_query_command(
        &self,
        command: &QueryCommand<E>,
    ) -> Result<Option<E>, StoreError> {
        let page = self
            .browse(&BulkQueryCommand::new(command.spec.clone()))
            .await?;

        Ok(page.into_items().0.into_iter().next())
    }

    async fn execute_bulk_query_command(
        &self,
        command: &BulkQueryCommand<E>,
    ) -> Result<PagedCollection<E>, StoreError> {
        self.browse(command).await
    }

    async fn execute_remove_command(&self, command: &RemoveCommand<E>) -> Result<(), StoreError> {
        let key = command.entity.key()?;
        self.store
            .with_shelf::<E, _, _>(|shelf| {
                shelf.retain(|slot| !Self::key_matches(slot, &key));
            })
            .await;

        log::debug!("memory: removed one {} entity", E::MODEL.entity_name);
        Ok(())
    }

    async fn execute_bulk_remove_command(
        &self,
        command: &BulkRemoveCommand<E>,
    ) -> Result<(), StoreError> {
        let removals = command
            .entities
            .iter()
            .cloned()
            .map(|entity| async move { RemoveCommand::new(entity).delegate(self).await });

        try_join_all(removals).await?;
        Ok(())
    }

    async fn execute_batch_remove_command(
        &self,
        _command: &BatchRemoveCommand<E>,
    ) -> Result<(), StoreError> {
        // reference semantics: the removal clears the bare collection
        let cleared = self
            .store
            .with_shelf::<E, _, _>(|shelf| {
                let count = shelf.len();
                shelf.clear();
                count
            })
            .await;

        log::debug!(
            "memory: batch-removed {cleared} {} entities",
            E::MODEL.entity_name,
        );
        Ok(())
    }
}
