use crate::api::model::{AnalysisRequest, DateOption};

/// Keyword form state, local to the dashboard
#[derive(Debug, Clone, Default)]
pub struct AnalysisForm {
    keyword: String,
    date: DateOption,
    error: Option<String>,
}

impl AnalysisForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn date(&self) -> DateOption {
        self.date
    }

    /// Validation message from the last submit attempt
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn push(&mut self, c: char) {
        self.keyword.push(c);
        self.error = None;
    }

    pub fn pop(&mut self) {
        self.keyword.pop();
        self.error = None;
    }

    pub fn clear(&mut self) {
        self.keyword.clear();
        self.error = None;
    }

    pub fn toggle_date(&mut self) {
        self.date = self.date.toggle();
        self.error = None;
    }

    /// The submit button is disabled while loading or with a blank keyword
    pub fn can_submit(&self, loading: bool) -> bool {
        !loading && !self.keyword.trim().is_empty()
    }

    /// Validate and build the request to send. A blank keyword only sets
    /// the form error.
    pub fn submit(&mut self) -> Option<AnalysisRequest> {
        self.error = None;
        match AnalysisRequest::new(&self.keyword, self.date) {
            Ok(request) => Some(request),
            Err(e) => {
                self.error = Some(e.user_message());
                None
            }
        }
    }
}
