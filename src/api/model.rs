//! Wire types exchanged with the sentiment-analysis service.

use crate::core::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentiment tag attached to a news item or a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Left-to-right order used when ranking buckets
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Label of a single news item ("Positivo")
    pub fn item_label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positivo",
            Sentiment::Negative => "Negativo",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// Label of a bucket ("Positivas")
    pub fn bucket_label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positivas",
            Sentiment::Negative => "Negativas",
            Sentiment::Neutral => "Neutras",
        }
    }

    /// Label used in history rows ("Positivo: 60%")
    pub fn short_label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positivo",
            Sentiment::Negative => "Negativo",
            Sentiment::Neutral => "Neutro",
        }
    }

    /// Text glyph standing in for the sentiment icon
    pub fn icon(self) -> &'static str {
        match self {
            Sentiment::Positive => ":)",
            Sentiment::Negative => ":(",
            Sentiment::Neutral => ":|",
        }
    }
}

/// Day selector sent with an analysis request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateOption {
    #[default]
    #[serde(rename = "hoy")]
    Today,
    #[serde(rename = "ayer")]
    Yesterday,
}

impl DateOption {
    /// Value as sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            DateOption::Today => "hoy",
            DateOption::Yesterday => "ayer",
        }
    }

    /// Label shown in the form
    pub fn label(self) -> &'static str {
        match self {
            DateOption::Today => "Hoy",
            DateOption::Yesterday => "Ayer",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            DateOption::Today => DateOption::Yesterday,
            DateOption::Yesterday => DateOption::Today,
        }
    }
}

impl fmt::Display for DateOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hoy" | "today" => Ok(DateOption::Today),
            "ayer" | "yesterday" => Ok(DateOption::Yesterday),
            other => Err(Error::InvalidInput(format!(
                "Opción de fecha desconocida {other:?}, usa hoy o ayer"
            ))),
        }
    }
}

/// Body of `POST /api/news`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    keyword: String,
    date: DateOption,
}

impl AnalysisRequest {
    /// Build a request, rejecting empty or whitespace-only keywords
    pub fn new(keyword: &str, date: DateOption) -> Result<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::EmptyKeyword);
        }
        Ok(Self {
            keyword: keyword.to_string(),
            date,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn date(&self) -> DateOption {
        self.date
    }
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One ranked news item inside a sentiment bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub snippet: String,
    pub sentiment: Sentiment,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
}

/// Percentage strings as returned by the service ("60%")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Percentages {
    #[serde(rename = "positivas", default)]
    pub positive: Option<String>,
    #[serde(rename = "negativas", default)]
    pub negative: Option<String>,
    #[serde(rename = "neutras", default)]
    pub neutral: Option<String>,
}

impl Percentages {
    pub fn get(&self, sentiment: Sentiment) -> Option<&str> {
        match sentiment {
            Sentiment::Positive => self.positive.as_deref(),
            Sentiment::Negative => self.negative.as_deref(),
            Sentiment::Neutral => self.neutral.as_deref(),
        }
    }
}

/// One server-computed sentiment breakdown for a keyword/date query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyword: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(rename = "total_analizadas", default, skip_serializing_if = "Option::is_none")]
    pub total_analyzed: Option<u64>,
    #[serde(rename = "porcentaje", default, deserialize_with = "null_as_default")]
    pub percentages: Percentages,
    #[serde(rename = "top_positivas", default, deserialize_with = "null_as_default")]
    pub top_positive: Vec<NewsItem>,
    #[serde(rename = "top_negativas", default, deserialize_with = "null_as_default")]
    pub top_negative: Vec<NewsItem>,
    #[serde(rename = "top_neutras", default, deserialize_with = "null_as_default")]
    pub top_neutral: Vec<NewsItem>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Analysis {
    /// Number of analysed news items; zero counts as missing
    pub fn total_count(&self) -> u64 {
        self.total_analyzed
            .filter(|n| *n > 0)
            .or(self.total)
            .unwrap_or(0)
    }

    /// Ranked news list of a bucket
    pub fn news(&self, sentiment: Sentiment) -> &[NewsItem] {
        match sentiment {
            Sentiment::Positive => &self.top_positive,
            Sentiment::Negative => &self.top_negative,
            Sentiment::Neutral => &self.top_neutral,
        }
    }
}
