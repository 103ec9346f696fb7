use crate::api::model::{Analysis, AnalysisRequest};
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything the views render from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Result of the latest successful analysis
    pub current_analysis: Option<Analysis>,
    /// Request that produced (or is producing) the current analysis
    pub current_request: Option<AnalysisRequest>,
    /// Past analyses in the order the service returned them
    pub previous_analyses: Vec<Analysis>,
    pub loading: bool,
    pub error: Option<String>,
}

/// State transitions; the only way to change an `AppState`
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLoading(bool),
    SetError(Option<String>),
    SetCurrentAnalysis(Analysis),
    SetCurrentRequest(AnalysisRequest),
    SetHistory(Vec<Analysis>),
    ClearCurrent,
}

/// Apply one action to a state
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        Action::SetLoading(loading) => AppState { loading, ..state },
        Action::SetError(error) => AppState {
            error,
            loading: false,
            ..state
        },
        Action::SetCurrentAnalysis(analysis) => AppState {
            current_analysis: Some(analysis),
            loading: false,
            error: None,
            ..state
        },
        Action::SetCurrentRequest(request) => AppState {
            current_request: Some(request),
            ..state
        },
        Action::SetHistory(previous_analyses) => AppState {
            previous_analyses,
            ..state
        },
        // The request only describes the current analysis, so they go together.
        Action::ClearCurrent => AppState {
            current_analysis: None,
            current_request: None,
            ..state
        },
    }
}

/// Shared handle to the single application state of a session
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<AppState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a given state
    pub fn with_state(state: AppState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Apply an action through the reducer
    pub fn dispatch(&self, action: Action) {
        let mut guard = self.lock();
        let current = std::mem::take(&mut *guard);
        *guard = reduce(current, action);
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AppState {
        self.lock().clone()
    }

    /// Read the state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        // reduce cannot panic, so a poisoned lock still holds a consistent state
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::model::DateOption;

    fn analysis(keyword: &str) -> Analysis {
        serde_json::from_value(serde_json::json!({ "_id": keyword, "keyword": keyword }))
            .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::default();
        assert!(state.current_analysis.is_none());
        assert!(state.current_request.is_none());
        assert!(state.previous_analyses.is_empty());
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_set_error_clears_loading() {
        let state = reduce(AppState::default(), Action::SetLoading(true));
        assert!(state.loading);

        let state = reduce(state, Action::SetError(Some("boom".to_string())));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_current_analysis_clears_loading_and_error() {
        let state = AppState {
            loading: true,
            error: Some("old".to_string()),
            ..AppState::default()
        };

        let state = reduce(state, Action::SetCurrentAnalysis(analysis("agua")));
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.current_analysis.unwrap().keyword, "agua");
    }

    #[test]
    fn test_clear_current_clears_request_too() {
        let request = AnalysisRequest::new("agua", DateOption::Today).unwrap();
        let state = reduce(AppState::default(), Action::SetCurrentRequest(request));
        let state = reduce(state, Action::SetCurrentAnalysis(analysis("agua")));
        let state = reduce(state, Action::SetHistory(vec![analysis("a"), analysis("b")]));

        let state = reduce(state, Action::ClearCurrent);
        assert!(state.current_analysis.is_none());
        assert!(state.current_request.is_none());
        assert_eq!(state.previous_analyses.len(), 2);
    }

    #[test]
    fn test_history_replaced_wholesale_in_order() {
        let state = reduce(AppState::default(), Action::SetHistory(vec![analysis("a")]));
        let state = reduce(
            state,
            Action::SetHistory(vec![analysis("c"), analysis("b")]),
        );
        let keywords: Vec<_> = state.previous_analyses.iter().map(|a| a.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["c", "b"]);
    }

    #[test]
    fn test_store_dispatch_is_visible_to_clones() {
        let store = Store::new();
        let other = store.clone();
        store.dispatch(Action::SetLoading(true));
        assert!(other.read(|s| s.loading));
        other.dispatch(Action::SetError(None));
        assert!(!store.snapshot().loading);
    }
}
