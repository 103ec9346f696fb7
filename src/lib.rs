// Core functionality
pub mod core {
    pub mod config;
    pub mod error;
    pub mod logging;
}

// Service access
pub mod api {
    pub mod client;
    pub mod model;
}

// Application state
pub mod store {
    pub mod fetch;
    pub mod state;
}

// Presentation helpers
pub mod view {
    pub mod filter;
    pub mod format;
    pub mod sentiment;
}

// User interfaces
pub mod ui {
    pub mod cli;
    pub mod form;
    pub mod report;
    pub mod tui;
}

// Re-export commonly used types
pub use crate::api::client::{ApiClient, SentimentApi};
pub use crate::api::model::{Analysis, AnalysisRequest, DateOption, NewsItem, Percentages, Sentiment};
pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use crate::store::fetch::NewsFetcher;
pub use crate::store::state::{reduce, Action, AppState, Store};
pub use crate::ui::cli::Cli;
pub use crate::ui::tui::DashboardTui;
pub use crate::view::filter::{filter_by_day, filter_by_local_day};
pub use crate::view::sentiment::{dominant_sentiment, parse_percentage};
