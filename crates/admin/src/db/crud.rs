//! The shared shape of an admin CRUD resource.
//!
//! Each managed table (products, categories, blog posts, hero slides,
//! featured sections) implements [`CrudStore`]; a single generic router in
//! `routes::crud` then serves list/get/create/update/delete for all of
//! them. Stores own a pool clone so the router can hold them as axum
//! state.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::RepositoryError;

/// Persistence operations of one admin-managed resource.
pub trait CrudStore: Clone + Send + Sync + 'static {
    /// The entity as returned to the client.
    type Entity: Serialize + Send + Sync;
    /// The payload accepted for create and update.
    type Draft: DeserializeOwned + Send + 'static;

    /// Resource name used in tracing and error messages.
    const RESOURCE: &'static str;

    /// All entities, in the resource's natural order.
    fn list(&self) -> impl Future<Output = Result<Vec<Self::Entity>, RepositoryError>> + Send;

    /// One entity by id.
    fn get(&self, id: i32) -> impl Future<Output = Result<Self::Entity, RepositoryError>> + Send;

    /// Insert a new entity.
    fn create(
        &self,
        draft: Self::Draft,
    ) -> impl Future<Output = Result<Self::Entity, RepositoryError>> + Send;

    /// Replace an existing entity.
    fn update(
        &self,
        id: i32,
        draft: Self::Draft,
    ) -> impl Future<Output = Result<Self::Entity, RepositoryError>> + Send;

    /// Delete an entity.
    fn delete(&self, id: i32) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
