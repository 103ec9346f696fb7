use crate::api::client::SentimentApi;
use crate::api::model::{Analysis, AnalysisRequest};
use crate::core::error::Result;
use crate::store::state::{Action, Store};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs service calls and records their outcome in the store
#[derive(Clone)]
pub struct NewsFetcher {
    api: Arc<dyn SentimentApi>,
    store: Store,
}

impl NewsFetcher {
    pub fn new(api: Arc<dyn SentimentApi>, store: Store) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run one analysis. The error is recorded in the store and also
    /// returned so callers can stop their own flow.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<Analysis> {
        self.store.dispatch(Action::SetLoading(true));
        self.store.dispatch(Action::SetError(None));
        self.store.dispatch(Action::SetCurrentRequest(request.clone()));

        match self.api.submit_analysis(&request).await {
            Ok(analysis) => {
                info!(keyword = %analysis.keyword, total = analysis.total_count(), "analysis completed");
                self.store.dispatch(Action::SetCurrentAnalysis(analysis.clone()));
                Ok(analysis)
            }
            Err(e) => {
                warn!(keyword = %request.keyword(), error = %e, "analysis failed");
                self.store.dispatch(Action::SetError(Some(e.user_message())));
                Err(e)
            }
        }
    }

    /// Reload the history and hand any failure back to the caller. The
    /// store error stays untouched either way.
    pub async fn load_history(&self) -> Result<usize> {
        let analyses = self.api.list_analyses().await?;
        let count = analyses.len();
        info!(count, "history loaded");
        self.store.dispatch(Action::SetHistory(analyses));
        Ok(count)
    }

    /// Reload the history. Failures are only logged.
    pub async fn fetch_history(&self) {
        match self.load_history().await {
            Ok(_) => {}
            Err(e) if e.is_connectivity() => {
                warn!("Backend server not available. Previous analyses will not be loaded.");
            }
            Err(e) => {
                error!(error = %e, "Error fetching previous analyses");
            }
        }
    }

    pub fn clear_current(&self) {
        self.store.dispatch(Action::ClearCurrent);
    }
}
