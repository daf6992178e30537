use crate::{
    codec,
    document::{Document, PrimaryData},
    query::{FilterUrlVisitor, IncludeUrlVisitor, PageUrlVisitor, SortUrlVisitor},
};
use async_trait::async_trait;
use depot_core::{
    collection::{EntityCollection, PagedCollection},
    command::{
        AddCommand, BulkAddCommand, BulkQueryCommand, BulkRemoveCommand, BulkSaveCommand,
        BulkUpdateCommand, QueryCommand, QuerySpec, RemoveCommand, SaveCommand, UpdateCommand,
    },
    error::{ProtocolError, StoreError},
    provider::EntityProvider,
    traits::EntityKind,
    value::Value,
};
use futures::future::try_join_all;
use reqwest::{
    Client, Method,
    header::{ACCEPT, CONTENT_TYPE},
};

const MEDIA_TYPE: &str = "application/vnd.api+json";

///
/// JsonApiConfig
///

#[derive(Clone, Debug)]
pub struct JsonApiConfig {
    /// Server base URL; resource links hang directly below it.
    pub base_url: String,
}

impl Default for JsonApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl JsonApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { base_url }
    }

    /// Collection link for one resource type.
    #[must_use]
    pub fn resource_href(&self, resource: &str) -> String {
        format!("{}/{resource}", self.base_url)
    }

    /// Singular link for one resource.
    #[must_use]
    pub fn entity_href(&self, resource: &str, id: &str) -> String {
        format!("{}/{resource}/{id}", self.base_url)
    }
}

///
/// JsonApiProvider
///
/// Remote backend speaking the JSON:API wire format over HTTP. Expressions
/// compile to query strings, entities to documents; non-success statuses
/// map onto the protocol error taxonomy. Batch commands stay rejected:
/// the protocol has no native bulk mutation.
///

pub struct JsonApiProvider {
    config: JsonApiConfig,
    http: Client,
}

impl JsonApiProvider {
    #[must_use]
    pub fn new(config: JsonApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, tracing).
    #[must_use]
    pub const fn with_client(config: JsonApiConfig, http: Client) -> Self {
        Self { config, http }
    }

    fn render_key(key: &Value) -> String {
        match key {
            Value::Text(text) => text.clone(),
            Value::Uint(n) => n.to_string(),
            Value::Int(n) => n.to_string(),
            other => format!("{other:?}"),
        }
    }

    fn entity_href<E: EntityKind>(&self, entity: &E) -> Result<String, StoreError> {
        let key = entity.key()?;
        Ok(self
            .config
            .entity_href(E::MODEL.entity_name, &Self::render_key(&key)))
    }

    /// Compose the browse link: active fragments in fixed order (filter,
    /// sort, include, paginate), joined `?` then `&`.
    pub(crate) fn browse_href(
        &self,
        resource: &str,
        spec: &QuerySpec,
    ) -> Result<String, StoreError> {
        let mut fragments = Vec::new();

        if let Some(filter) = &spec.filter {
            fragments.push(FilterUrlVisitor.compile(filter));
        }
        if let Some(sort) = &spec.sort {
            fragments.push(SortUrlVisitor.compile(sort));
        }
        if let Some(include) = &spec.include {
            fragments.push(IncludeUrlVisitor.compile(include));
        }
        if let Some(paginate) = &spec.paginate {
            let fragment = PageUrlVisitor.compile(paginate)?;
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }

        let mut href = self.config.resource_href(resource);
        for (index, fragment) in fragments.iter().enumerate() {
            href.push(if index == 0 { '?' } else { '&' });
            href.push_str(fragment);
        }

        Ok(href)
    }

    async fn request(
        &self,
        method: Method,
        href: String,
        entity: &'static str,
        body: Option<&Document>,
    ) -> Result<Option<Document>, StoreError> {
        log::debug!("jsonapi: {method} {href}");

        let mut request = self
            .http
            .request(method, &href)
            .header(CONTENT_TYPE, MEDIA_TYPE)
            .header(ACCEPT, MEDIA_TYPE);
        if let Some(document) = body {
            request = request.json(document);
        }

        let response = request.send().await.map_err(|err| ProtocolError::Transport {
            href: href.clone(),
            message: err.to_string(),
        })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            log::warn!("jsonapi: {href} answered {status}");
            return Err(ProtocolError::from_status(href, status).into());
        }

        let text = response.text().await.map_err(|err| ProtocolError::Transport {
            href: href.clone(),
            message: err.to_string(),
        })?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|err| StoreError::Codec {
                entity,
                message: err.to_string(),
            })
    }

    fn decode_one<E: EntityKind>(document: &Document) -> Result<Option<E>, StoreError> {
        match &document.data {
            PrimaryData::One(Some(resource)) => {
                codec::from_resource(resource, document).map(Some)
            }
            PrimaryData::One(None) => Ok(None),
            PrimaryData::Many(resources) => resources
                .first()
                .map(|resource| codec::from_resource(resource, document))
                .transpose(),
        }
    }

    fn decode_many<E: EntityKind>(
        document: &Document,
    ) -> Result<EntityCollection<E>, StoreError> {
        let resources: Vec<_> = match &document.data {
            PrimaryData::Many(resources) => resources.iter().collect(),
            PrimaryData::One(Some(resource)) => vec![resource],
            PrimaryData::One(None) => Vec::new(),
        };

        resources
            .into_iter()
            .map(|resource| codec::from_resource(resource, document))
            .collect()
    }

    /// Send one entity-bearing write and decode the echoed resource, falling
    /// back to the sent entity when the server answers with no body.
    async fn write_entity<E: EntityKind>(
        &self,
        method: Method,
        href: String,
        entity: &E,
    ) -> Result<E, StoreError> {
        let document = Document::single(codec::to_resource(entity)?);
        let response = self
            .request(method, href, E::MODEL.entity_name, Some(&document))
            .await?;

        match response {
            Some(document) => Ok(Self::decode_one(&document)?.unwrap_or_else(|| entity.clone())),
            None => Ok(entity.clone()),
        }
    }
}

#[async_trait]
impl<E: EntityKind> EntityProvider<E> for JsonApiProvider {
    fn name(&self) -> &'static str {
        "jsonapi"
    }

    async fn execute_add_command(&self, command: &AddCommand<E>) -> Result<E, StoreError> {
        let href = self.config.resource_href(E::MODEL.entity_name);
        self.write_entity(Method::POST, href, &command.entity).await
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
        let href = self.entity_href(&command.entity)?;
        self.write_entity(Method::PATCH, href, &command.entity).await
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

    async fn execute_save_command(&self, command: &SaveCommand<E>) -> Result<E, StoreError> {
        // save is an upsert: patch in place, create when the target is gone
        match UpdateCommand::new(command.entity.clone()).delegate(self).await {
            Ok(entity) => Ok(entity),
            Err(err) if err.is_not_found() => {
                AddCommand::new(command.entity.clone()).delegate(self).await
            }
            Err(err) => Err(err),
        }
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
        let href = self.browse_href(E::MODEL.entity_name, &command.spec)?;
        let response = self
            .request(Method::GET, href, E::MODEL.entity_name, None)
            .await?;

        match response {
            Some(document) => Self::decode_one(&document),
            None => Ok(None),
        }
    }

    async fn execute_bulk_query_command(
        &self,
        command: &BulkQueryCommand<E>,
    ) -> Result<PagedCollection<E>, StoreError> {
        let href = self.browse_href(E::MODEL.entity_name, &command.spec)?;
        let response = self
            .request(Method::GET, href, E::MODEL.entity_name, None)
            .await?;

        let Some(document) = response else {
            return Ok(PagedCollection::new(EntityCollection::new()));
        };

        let items = Self::decode_many(&document)?;
        let mut page = PagedCollection::new(items);
        if let Some(total) = document.meta.as_ref().and_then(|meta| meta.total) {
            page = page.with_total(total);
        }
        if let Some(links) = document.links {
            page = page.with_links(links.next, links.prev);
        }

        Ok(page)
    }

    async fn execute_remove_command(&self, command: &RemoveCommand<E>) -> Result<(), StoreError> {
        let href = self.entity_href(&command.entity)?;
        self.request(Method::DELETE, href, E::MODEL.entity_name, None)
            .await?;
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

    // batch update/remove intentionally keep the rejecting defaults:
    // JSON:API has no native batch mutation to translate them into
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{USER_MODEL, User};
    use depot_core::{
        command::{BatchRemoveCommand, BatchUpdateCommand},
        error::SupportError,
        expr::{FilterExpr, PaginateExpr, SortExpr},
        patch::EntityPatch,
        path::PropertyPath,
        provider::EntityProvider,
    };

    fn provider() -> JsonApiProvider {
        JsonApiProvider::new(JsonApiConfig::new("http://localhost:3000/"))
    }

    fn path(name: &str) -> PropertyPath {
        PropertyPath::resolve(&USER_MODEL, name).unwrap()
    }

    #[test]
    fn config_builds_resource_and_entity_links() {
        let config = JsonApiConfig::new("https://api.example.test/v1/");
        assert_eq!(
            config.resource_href("users"),
            "https://api.example.test/v1/users"
        );
        assert_eq!(
            config.entity_href("users", "7"),
            "https://api.example.test/v1/users/7"
        );
    }

    #[test]
    fn browse_href_composes_fragments_in_fixed_order() {
        let spec = QuerySpec {
            filter: Some(FilterExpr::eq(path("name"), "Alex")),
            sort: Some(SortExpr::asc(path("name")).then_desc(path("priority"))),
            include: None,
            paginate: Some(PaginateExpr::offset_limit(20, 10)),
        };

        let href = provider().browse_href("users", &spec).unwrap();
        assert_eq!(
            href,
            "http://localhost:3000/users\
             ?filter=equals(display-name, 'Alex')\
             &sort=display-name,-priority\
             &page[limit]=10&page[offset]=20"
        );
    }

    #[test]
    fn browse_href_without_expressions_is_the_bare_resource_link() {
        let href = provider()
            .browse_href("users", &QuerySpec::default())
            .unwrap();
        assert_eq!(href, "http://localhost:3000/users");
    }

    #[test]
    fn empty_page_fragments_are_skipped() {
        let spec = QuerySpec {
            paginate: Some(PaginateExpr::OffsetLimit {
                offset: None,
                limit: None,
            }),
            ..QuerySpec::default()
        };

        let href = provider().browse_href("users", &spec).unwrap();
        assert_eq!(href, "http://localhost:3000/users");
    }

    #[tokio::test]
    async fn batch_commands_are_capability_mismatches() {
        let provider = provider();

        let update: BatchUpdateCommand<User> =
            BatchUpdateCommand::new(EntityPatch::new(), QuerySpec::default());
        let err = update.delegate(&provider).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Support(SupportError::Command {
                command: "BatchUpdateCommand",
                provider: "jsonapi",
            })
        ));

        let remove: BatchRemoveCommand<User> = BatchRemoveCommand::new(QuerySpec::default());
        let err = remove.delegate(&provider).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Support(SupportError::Command {
                command: "BatchRemoveCommand",
                provider: "jsonapi",
            })
        ));
    }

    #[test]
    fn keys_render_without_quoting() {
        assert_eq!(JsonApiProvider::render_key(&Value::Uint(7)), "7");
        assert_eq!(JsonApiProvider::render_key(&Value::Int(-2)), "-2");
        assert_eq!(
            JsonApiProvider::render_key(&Value::Text("ulid-ish".to_string())),
            "ulid-ish"
        );
    }
}
