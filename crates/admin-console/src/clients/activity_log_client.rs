//! # Activity Log Client
//!
//! Read-only access to `/activity-logs` with the audit filters the console
//! offers. Every filter change goes back to page 1.
use crate::error::ConsoleError;
use crate::model::ActivityLog;
use async_trait::async_trait;
use chrono::NaiveDate;
use console_framework::{
    ApiError, ApiTransport, ConsoleClient, ListController, ListResource, QueryParams, QueryPatch,
};
use std::sync::Arc;
use tracing::instrument;

const USER_KEY: &str = "user_id";
const ACTION_KEY: &str = "action";
const FROM_KEY: &str = "date_from";
const TO_KEY: &str = "date_to";
const SEARCH_KEY: &str = "search";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client for the activity log.
pub struct ActivityLogClient {
    inner: ListController<ActivityLog>,
}

impl ActivityLogClient {
    pub fn new(transport: Arc<dyn ApiTransport>, params: QueryParams) -> Self {
        Self {
            inner: ListController::new(transport, params),
        }
    }
}

#[async_trait]
impl ConsoleClient<ActivityLog> for ActivityLogClient {
    type Error = ConsoleError;

    fn controller(&self) -> &ListController<ActivityLog> {
        &self.inner
    }

    fn map_error(e: ApiError) -> Self::Error {
        ConsoleError::Api(e)
    }
}

impl ActivityLogClient {
    pub fn entries(&self) -> Vec<ActivityLog> {
        self.inner.items()
    }

    #[instrument(skip(self))]
    pub async fn filter_by_user(
        &self,
        user_id: Option<u64>,
    ) -> Result<ListResource<ActivityLog>, ConsoleError> {
        let patch = match user_id {
            Some(id) => QueryPatch::new().set(USER_KEY, id.to_string()),
            None => QueryPatch::new().clear(USER_KEY),
        };
        self.apply(patch).await
    }

    #[instrument(skip(self))]
    pub async fn filter_by_action(
        &self,
        action: Option<String>,
    ) -> Result<ListResource<ActivityLog>, ConsoleError> {
        let patch = match action {
            Some(action) => QueryPatch::new().set(ACTION_KEY, action),
            None => QueryPatch::new().clear(ACTION_KEY),
        };
        self.apply(patch).await
    }

    /// Restricts entries to `from..=to`, both `YYYY-MM-DD`. `None` leaves that
    /// end open.
    #[instrument(skip(self))]
    pub async fn date_range(
        &self,
        from: Option<String>,
        to: Option<String>,
    ) -> Result<ListResource<ActivityLog>, ConsoleError> {
        let from = from.as_deref().map(parse_date).transpose()?;
        let to = to.as_deref().map(parse_date).transpose()?;
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ConsoleError::Validation(
                    "Start date must not be after end date".into(),
                ));
            }
        }

        let mut patch = QueryPatch::new();
        patch = match from {
            Some(from) => patch.set(FROM_KEY, from.format(DATE_FORMAT).to_string()),
            None => patch.clear(FROM_KEY),
        };
        patch = match to {
            Some(to) => patch.set(TO_KEY, to.format(DATE_FORMAT).to_string()),
            None => patch.clear(TO_KEY),
        };
        self.apply(patch).await
    }

    #[instrument(skip(self))]
    pub async fn clear_filters(&self) -> Result<ListResource<ActivityLog>, ConsoleError> {
        let patch = [USER_KEY, ACTION_KEY, FROM_KEY, TO_KEY, SEARCH_KEY]
            .into_iter()
            .fold(QueryPatch::new(), QueryPatch::clear);
        self.apply(patch).await
    }

    async fn apply(&self, patch: QueryPatch) -> Result<ListResource<ActivityLog>, ConsoleError> {
        self.inner
            .update_query_params(patch)
            .await
            .map_err(Self::map_error)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ConsoleError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ConsoleError::Validation(format!("{raw:?} is not a valid YYYY-MM-DD date")))
}
