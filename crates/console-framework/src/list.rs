//! # List Controller
//!
//! The [`ListController<R>`] owns one paginated, filterable collection and the
//! CRUD operations over it. It is composed of [`ResourceHook`]s: one for the
//! list read and one per kind of mutation.
//!
//! ## Reload Policy
//!
//! Mutations never patch the local list. After every successful write the
//! controller re-reads the collection with its current query parameters, so
//! what callers see is always the last full read.
//!
//! ## Permissive Reads
//!
//! A list response in an unrecognized shape is logged and treated as an empty
//! list. Network failures and server rejections put the list hook into
//! `Error`, while [`resource`](ListController::resource) keeps serving the last
//! list that loaded successfully.

use crate::envelope::{normalize_list, MutationReceipt, Page};
use crate::error::ApiError;
use crate::hook::{HookOptions, ResourceHook};
use crate::lock;
use crate::query::{QueryParams, QueryPatch};
use crate::resource::AdminResource;
use crate::state::AsyncState;
use crate::transport::{ApiRequest, ApiTransport};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// One page of a collection plus its pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResource<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub current_page: u32,
    pub per_page: u32,
}

impl<T> ListResource<T> {
    pub fn empty(per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            current_page: 1,
            per_page,
        }
    }

    /// Builds a list from a normalized page. Missing `total` and
    /// `current_page` default to `0` and `1`.
    pub fn from_page(page: Page<T>, per_page: u32) -> Self {
        Self {
            items: page.items,
            total: page.meta.total.unwrap_or(0),
            current_page: page.meta.current_page.unwrap_or(1).max(1),
            per_page: page.meta.per_page.unwrap_or(per_page).max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_pages(&self) -> u32 {
        let per_page = u64::from(self.per_page.max(1));
        u32::try_from(self.total.div_ceil(per_page)).unwrap_or(u32::MAX)
    }

    /// Whether a pager should be shown at all.
    pub fn has_pagination(&self) -> bool {
        self.total_pages() > 1
    }
}

/// The kinds of write a controller performs, one hook each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    /// Resource-specific writes such as assigning permissions.
    Action,
}

/// Owns a [`ListResource<R>`] and the CRUD operations over it.
pub struct ListController<R: AdminResource> {
    transport: Arc<dyn ApiTransport>,
    params: Mutex<QueryParams>,
    list: ResourceHook<ListResource<R>>,
    loaded: Arc<Mutex<ListResource<R>>>,
    create: ResourceHook<MutationReceipt>,
    update: ResourceHook<MutationReceipt>,
    delete: ResourceHook<MutationReceipt>,
    action: ResourceHook<MutationReceipt>,
}

impl<R: AdminResource> ListController<R> {
    pub fn new(transport: Arc<dyn ApiTransport>, params: QueryParams) -> Self {
        let loaded = Arc::new(Mutex::new(ListResource::empty(params.per_page)));
        let sink = Arc::clone(&loaded);
        let kind = R::kind();

        let list = ResourceHook::new(format!("{kind}.list")).with_options(
            HookOptions::new().on_success(move |resource: &ListResource<R>| {
                *lock(&sink) = resource.clone();
            }),
        );

        Self {
            transport,
            params: Mutex::new(params),
            list,
            loaded,
            create: ResourceHook::new(format!("{kind}.create")),
            update: ResourceHook::new(format!("{kind}.update")),
            delete: ResourceHook::new(format!("{kind}.delete")),
            action: ResourceHook::new(format!("{kind}.action")),
        }
    }

    pub fn params(&self) -> QueryParams {
        lock(&self.params).clone()
    }

    /// State of the list read.
    pub fn state(&self) -> AsyncState<ListResource<R>> {
        self.list.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<AsyncState<ListResource<R>>> {
        self.list.subscribe()
    }

    /// The last list that loaded successfully.
    pub fn resource(&self) -> ListResource<R> {
        lock(&self.loaded).clone()
    }

    pub fn items(&self) -> Vec<R> {
        lock(&self.loaded).items.clone()
    }

    pub fn mutation_state(&self, kind: MutationKind) -> AsyncState<MutationReceipt> {
        self.hook(kind).state()
    }

    /// Reads the collection with `params`, which become the current params.
    #[instrument(skip(self), fields(resource = R::kind()))]
    pub async fn fetch(&self, params: QueryParams) -> Result<ListResource<R>, ApiError> {
        *lock(&self.params) = params.clone();
        let request = ApiRequest::get(R::COLLECTION).with_query(params.to_pairs());
        let transport = Arc::clone(&self.transport);
        let per_page = params.per_page;

        self.list
            .execute(async move {
                let body = transport.send(request).await?;
                into_list_resource::<R>(body, per_page)
            })
            .await
    }

    /// Reads the collection again with the current params.
    pub async fn refresh(&self) -> Result<ListResource<R>, ApiError> {
        let params = self.params();
        self.fetch(params).await
    }

    /// Merges `patch` into the current params and refetches once.
    pub async fn update_query_params(&self, patch: QueryPatch) -> Result<ListResource<R>, ApiError> {
        let params = {
            let mut params = lock(&self.params);
            params.apply(patch);
            params.clone()
        };
        debug!(resource = R::kind(), ?params, "Query params updated");
        self.fetch(params).await
    }

    #[instrument(skip(self), fields(resource = R::kind()))]
    pub async fn create(&self, payload: R::Create) -> Result<MutationReceipt, ApiError> {
        let request = ApiRequest::post(R::COLLECTION).with_json(&payload)?;
        self.mutate(MutationKind::Create, request).await
    }

    #[instrument(skip(self), fields(resource = R::kind()))]
    pub async fn update(&self, id: &R::Id, payload: R::Update) -> Result<MutationReceipt, ApiError> {
        let request = ApiRequest::put(R::member_path(id)).with_json(&payload)?;
        self.mutate(MutationKind::Update, request).await
    }

    #[instrument(skip(self), fields(resource = R::kind()))]
    pub async fn delete(&self, id: &R::Id) -> Result<MutationReceipt, ApiError> {
        self.mutate(MutationKind::Delete, ApiRequest::delete(R::member_path(id)))
            .await
    }

    /// Sends a resource-specific write under the same reload policy.
    pub async fn perform(&self, request: ApiRequest) -> Result<MutationReceipt, ApiError> {
        self.mutate(MutationKind::Action, request).await
    }

    /// Aborts the in-flight read and writes.
    pub fn cancel(&self) {
        self.list.cancel();
        self.create.cancel();
        self.update.cancel();
        self.delete.cancel();
        self.action.cancel();
    }

    async fn mutate(
        &self,
        kind: MutationKind,
        request: ApiRequest,
    ) -> Result<MutationReceipt, ApiError> {
        debug!(resource = R::kind(), ?kind, path = %request.path, body = ?request.body, "Mutation");
        let transport = Arc::clone(&self.transport);

        let receipt = self
            .hook(kind)
            .execute(async move { MutationReceipt::from_response(transport.send(request).await?) })
            .await?;

        info!(resource = R::kind(), ?kind, "Mutation ok");
        if let Err(e) = self.refresh().await {
            warn!(resource = R::kind(), error = %e, "Reload after mutation failed");
        }
        Ok(receipt)
    }

    fn hook(&self, kind: MutationKind) -> &ResourceHook<MutationReceipt> {
        match kind {
            MutationKind::Create => &self.create,
            MutationKind::Update => &self.update,
            MutationKind::Delete => &self.delete,
            MutationKind::Action => &self.action,
        }
    }
}

fn into_list_resource<R: AdminResource>(
    body: Value,
    per_page: u32,
) -> Result<ListResource<R>, ApiError> {
    match normalize_list::<R>(body) {
        Ok(page) => Ok(ListResource::from_page(page, per_page)),
        Err(ApiError::ShapeMismatch(reason)) => {
            warn!(resource = R::kind(), %reason, "Unrecognized list response, using empty list");
            Ok(ListResource::empty(per_page))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::PageMeta;

    #[test]
    fn missing_meta_defaults_total_and_page() {
        let page = Page {
            items: vec![1, 2, 3],
            meta: PageMeta::default(),
        };
        let list = ListResource::from_page(page, 10);
        assert_eq!((list.total, list.current_page, list.per_page), (0, 1, 10));
        assert!(!list.has_pagination());
    }

    #[test]
    fn total_pages_rounds_up() {
        let mut list = ListResource::<u8>::empty(10);
        list.total = 31;
        assert_eq!(list.total_pages(), 4);
        assert!(list.has_pagination());

        list.total = 10;
        assert_eq!(list.total_pages(), 1);
    }
}
