//! # Permission Client
//!
//! Loads the grantable permissions grouped into categories and serves the
//! search-as-you-type view over them.
//!
//! Categories come from `/permissions/categories`. When that endpoint is
//! missing (404) or answers in an unknown shape, the flat `/permissions`
//! list is grouped locally with [`categorize`].
use crate::error::ConsoleError;
use crate::model::{Permission, PermissionCategory};
use crate::permissions::{categorize, filter_categories};
use async_trait::async_trait;
use console_framework::{
    normalize_list, AdminResource, ApiError, ApiRequest, ApiTransport, AsyncState, ConsoleClient,
    ListController, QueryParams, ResourceHook,
};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

pub const CATEGORIES_PATH: &str = "/permissions/categories";

/// Client for the permission catalog.
pub struct PermissionClient {
    inner: ListController<Permission>,
    transport: Arc<dyn ApiTransport>,
    categories: ResourceHook<Vec<PermissionCategory>>,
    query: Mutex<String>,
}

impl PermissionClient {
    pub fn new(transport: Arc<dyn ApiTransport>, params: QueryParams) -> Self {
        Self {
            inner: ListController::new(Arc::clone(&transport), params),
            transport,
            categories: ResourceHook::new("Permission.categories"),
            query: Mutex::new(String::new()),
        }
    }
}

#[async_trait]
impl ConsoleClient<Permission> for PermissionClient {
    type Error = ConsoleError;

    fn controller(&self) -> &ListController<Permission> {
        &self.inner
    }

    fn map_error(e: ApiError) -> Self::Error {
        ConsoleError::Api(e)
    }
}

impl PermissionClient {
    /// Loads every category and returns them unfiltered.
    #[instrument(skip(self))]
    pub async fn load_categories(&self) -> Result<Vec<PermissionCategory>, ConsoleError> {
        let transport = Arc::clone(&self.transport);
        self.categories
            .execute(async move { fetch_categories(transport.as_ref()).await })
            .await
            .map_err(Self::map_error)
    }

    pub fn cancel(&self) {
        self.inner.cancel();
        self.categories.cancel();
    }

    pub fn categories_state(&self) -> AsyncState<Vec<PermissionCategory>> {
        self.categories.state()
    }

    pub fn subscribe_categories(&self) -> watch::Receiver<AsyncState<Vec<PermissionCategory>>> {
        self.categories.subscribe()
    }

    pub fn query(&self) -> String {
        self.query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores `query` and returns the matching view of the loaded categories.
    pub fn search_categories(&self, query: impl Into<String>) -> Vec<PermissionCategory> {
        let query = query.into();
        debug!(%query, "Permission search");
        *self.query.lock().unwrap_or_else(PoisonError::into_inner) = query;
        self.filtered()
    }

    /// The loaded categories narrowed by the current query. Empty until a
    /// load succeeds.
    pub fn filtered(&self) -> Vec<PermissionCategory> {
        let query = self.query();
        match self.categories.state().data() {
            Some(categories) => filter_categories(categories, &query).into_owned(),
            None => Vec::new(),
        }
    }
}

async fn fetch_categories(
    transport: &dyn ApiTransport,
) -> Result<Vec<PermissionCategory>, ApiError> {
    let grouped = match transport.send(ApiRequest::get(CATEGORIES_PATH)).await {
        Ok(body) => normalize_list::<PermissionCategory>(body),
        Err(e) => Err(e),
    };

    match grouped {
        Ok(page) => Ok(page.items),
        Err(e @ ApiError::ShapeMismatch(_)) => {
            warn!(error = %e, "Grouping permissions locally");
            fetch_flat(transport).await
        }
        Err(e) if e.status() == Some(404) => {
            debug!("No categories endpoint, grouping permissions locally");
            fetch_flat(transport).await
        }
        Err(e) => Err(e),
    }
}

async fn fetch_flat(transport: &dyn ApiTransport) -> Result<Vec<PermissionCategory>, ApiError> {
    let body = transport.send(ApiRequest::get(Permission::COLLECTION)).await?;
    let page = normalize_list::<Permission>(body)?;
    Ok(categorize(&page.items))
}
