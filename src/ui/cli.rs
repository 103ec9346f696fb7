use crate::api::model::DateOption;
use clap::{Parser, Subcommand};

/// sentiboard - News sentiment analysis dashboard
#[derive(Parser, Debug)]
#[command(name = "sentiboard")]
#[command(about = "A terminal dashboard for keyword-driven news sentiment analysis", long_about = None)]
#[command(version)]
#[command(subcommand_required = false)]
#[command(arg_required_else_help = false)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the sentiment service (default: $SENTIBOARD_API_URL or http://localhost:3000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (default: $SENTIBOARD_TIMEOUT_SECS or 30)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Load history when the dashboard starts (default: $SENTIBOARD_FETCH_ON_LOAD)
    #[arg(long, global = true)]
    pub fetch_on_load: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive dashboard (default)
    Dashboard,
    /// Analyze news for a keyword and print the breakdown
    Analyze {
        /// Keyword to analyze
        keyword: String,
        /// Day to analyze: hoy or ayer
        #[arg(short, long, default_value = "hoy")]
        date: DateOption,
    },
    /// List previous analyses
    History {
        /// Only show analyses created on this day (YYYY-MM-DD, local time)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Print the full breakdown of a previous analysis
    Show {
        /// Analysis id as listed by `history`
        id: String,
    },
}
