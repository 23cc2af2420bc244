//! # ConsoleClient Trait
//!
//! Provides a common interface for resource-specific clients, adding default
//! `refresh`, `search`, `go_to_page` and `remove` methods built on top of a
//! generic [`ListController`].
use crate::{AdminResource, ApiError, ListController, ListResource, MutationReceipt, QueryPatch};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard list operations.
///
/// # Example
///
/// ```rust
/// use console_framework::{AdminResource, ApiError, ConsoleClient, ListController};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Deserialize)]
/// struct Tag { id: u32, label: String }
/// #[derive(Debug, Serialize)] struct TagCreate { label: String }
///
/// impl AdminResource for Tag {
///     type Id = u32;
///     type Create = TagCreate;
///     type Update = TagCreate;
///     const COLLECTION: &'static str = "/tags";
/// }
///
/// #[derive(Debug)]
/// struct TagError(String);
/// impl From<ApiError> for TagError {
///     fn from(e: ApiError) -> Self { TagError(e.user_message()) }
/// }
///
/// struct TagClient { inner: ListController<Tag> }
///
/// impl ConsoleClient<Tag> for TagClient {
///     type Error = TagError;
///     fn controller(&self) -> &ListController<Tag> { &self.inner }
///     fn map_error(e: ApiError) -> TagError { TagError::from(e) }
/// }
///
/// // refresh(), search(), go_to_page() and remove() are provided automatically.
/// async fn usage(client: TagClient) {
///     let _ = client.search("urgent".into()).await;
///     let _ = client.remove(3).await;
/// }
/// ```
#[async_trait]
pub trait ConsoleClient<R: AdminResource>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<ApiError> + Send + Sync;

    /// Access the inner generic controller.
    fn controller(&self) -> &ListController<R>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: ApiError) -> Self::Error;

    /// Re-read the list with the current query params.
    #[tracing::instrument(skip(self))]
    async fn refresh(&self) -> Result<ListResource<R>, Self::Error> {
        tracing::debug!("Sending request");
        self.controller().refresh().await.map_err(Self::map_error)
    }

    /// Search-as-you-type: sets the `search` filter and goes back to page 1.
    #[tracing::instrument(skip(self))]
    async fn search(&self, term: String) -> Result<ListResource<R>, Self::Error> {
        self.controller()
            .update_query_params(QueryPatch::new().search(term))
            .await
            .map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn go_to_page(&self, page: u32) -> Result<ListResource<R>, Self::Error> {
        self.controller()
            .update_query_params(QueryPatch::new().page(page))
            .await
            .map_err(Self::map_error)
    }

    /// Delete an entity by ID, then reload the list.
    #[tracing::instrument(skip(self))]
    async fn remove(&self, id: R::Id) -> Result<MutationReceipt, Self::Error> {
        tracing::debug!("Sending request");
        self.controller().delete(&id).await.map_err(Self::map_error)
    }
}
