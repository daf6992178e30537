use crate::{
    collection::EntityCollection,
    command::{
        AddCommand, BulkAddCommand, BulkRemoveCommand, BulkSaveCommand, BulkUpdateCommand,
        RemoveCommand, SaveCommand, UpdateCommand,
    },
    error::{BuildError, StoreError},
    provider::EntityProvider,
    traits::EntityKind,
};
use std::marker::PhantomData;

// Single-entity write builders share one shape: attach exactly one entity,
// then build or build-and-delegate. Building without an attachment is a
// BuildError, never a partial command.
macro_rules! entity_command_builder {
    ($builder:ident, $command:ident, $terminal:ident, $result:ty) => {
        ///
        #[doc = concat!(" ", stringify!($builder))]
        ///
        #[doc = concat!(
            " Attach-gated builder for [`",
            stringify!($command),
            "`]; `",
            stringify!($terminal),
            "` builds and delegates in one step.",
        )]
        ///
        pub struct $builder<'a, E, P>
        where
            E: EntityKind,
            P: EntityProvider<E> + ?Sized,
        {
            provider: &'a P,
            entity: Option<E>,
            _marker: PhantomData<E>,
        }

        impl<'a, E, P> $builder<'a, E, P>
        where
            E: EntityKind,
            P: EntityProvider<E> + ?Sized,
        {
            pub(crate) const fn new(provider: &'a P) -> Self {
                Self {
                    provider,
                    entity: None,
                    _marker: PhantomData,
                }
            }

            /// Attach the entity payload.
            #[must_use]
            pub fn attach(mut self, entity: E) -> Self {
                self.entity = Some(entity);
                self
            }

            /// Freeze the attached entity into a command.
            pub fn build(self) -> Result<$command<E>, StoreError> {
                let entity = self.entity.ok_or(BuildError::EntityNotAttached {
                    entity: E::MODEL.entity_name,
                })?;

                Ok($command::new(entity))
            }

            /// Build and delegate to the provider.
            pub async fn $terminal(self) -> Result<$result, StoreError> {
                let provider = self.provider;
                let entity = self.entity.ok_or(BuildError::EntityNotAttached {
                    entity: E::MODEL.entity_name,
                })?;

                $command::new(entity).delegate(provider).await
            }
        }
    };
}

// Bulk write builders attach a whole collection instead.
macro_rules! collection_command_builder {
    ($builder:ident, $command:ident, $terminal:ident, $result:ty) => {
        ///
        #[doc = concat!(" ", stringify!($builder))]
        ///
        #[doc = concat!(
            " Attach-gated builder for [`",
            stringify!($command),
            "`]; `",
            stringify!($terminal),
            "` builds and delegates in one step.",
        )]
        ///
        pub struct $builder<'a, E, P>
        where
            E: EntityKind,
            P: EntityProvider<E> + ?Sized,
        {
            provider: &'a P,
            entities: Option<EntityCollection<E>>,
            _marker: PhantomData<E>,
        }

        impl<'a, E, P> $builder<'a, E, P>
        where
            E: EntityKind,
            P: EntityProvider<E> + ?Sized,
        {
            pub(crate) const fn new(provider: &'a P) -> Self {
                Self {
                    provider,
                    entities: None,
                    _marker: PhantomData,
                }
            }

            /// Attach the entity-collection payload.
            #[must_use]
            pub fn attach(mut self, entities: EntityCollection<E>) -> Self {
                self.entities = Some(entities);
                self
            }

            /// Freeze the attached collection into a command.
            pub fn build(self) -> Result<$command<E>, StoreError> {
                let entities = self.entities.ok_or(BuildError::CollectionNotAttached {
                    entity: E::MODEL.entity_name,
                })?;

                Ok($command::new(entities))
            }

            /// Build and delegate to the provider.
            pub async fn $terminal(self) -> Result<$result, StoreError> {
                let provider = self.provider;
                let entities = self.entities.ok_or(BuildError::CollectionNotAttached {
                    entity: E::MODEL.entity_name,
                })?;

                $command::new(entities).delegate(provider).await
            }
        }
    };
}

entity_command_builder!(AddCommandBuilder, AddCommand, add, E);
entity_command_builder!(UpdateCommandBuilder, UpdateCommand, update, E);
entity_command_builder!(SaveCommandBuilder, SaveCommand, save, E);
entity_command_builder!(RemoveCommandBuilder, RemoveCommand, remove, ());

collection_command_builder!(BulkAddCommandBuilder, BulkAddCommand, bulk_add, EntityCollection<E>);
collection_command_builder!(
    BulkUpdateCommandBuilder,
    BulkUpdateCommand,
    bulk_update,
    EntityCollection<E>
);
collection_command_builder!(
    BulkSaveCommandBuilder,
    BulkSaveCommand,
    bulk_save,
    EntityCollection<E>
);
collection_command_builder!(BulkRemoveCommandBuilder, BulkRemoveCommand, bulk_remove, ());

///
/// TESTS
///
