use crate::api::model::{Analysis, NewsItem, Sentiment};

/// Number of ranked items shown per bucket
pub const TOP_NEWS_LIMIT: usize = 5;

/// Parse a percentage string such as "45.2%".
///
/// Only the leading number counts; anything missing, unparseable or
/// non-finite reads as 0.
pub fn parse_percentage(value: Option<&str>) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    let cleaned: String = value.chars().filter(|c| *c != '%').collect();
    let number = leading_number(cleaned.trim_start());

    number
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Longest prefix shaped like a decimal number (sign, digits, fraction, exponent)
fn leading_number(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return "";
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Sentiment with the largest share; ties keep the earlier of
/// positive, negative, neutral.
pub fn dominant_sentiment(analysis: &Analysis) -> Sentiment {
    Sentiment::ALL
        .iter()
        .map(|s| (*s, parse_percentage(analysis.percentages.get(*s))))
        .reduce(|max, current| if current.1 > max.1 { current } else { max })
        .map(|(sentiment, _)| sentiment)
        .unwrap_or(Sentiment::Positive)
}

/// Summary of one bucket as shown on the results cards
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSummary<'a> {
    pub sentiment: Sentiment,
    pub percentage: f64,
    /// At most `TOP_NEWS_LIMIT` items
    pub top_news: &'a [NewsItem],
    /// Size of the full list returned by the service
    pub news_count: usize,
}

impl BucketSummary<'_> {
    pub fn label(&self) -> &'static str {
        self.sentiment.bucket_label()
    }
}

/// The three buckets of an analysis, in display order
pub fn bucket_summaries(analysis: &Analysis) -> [BucketSummary<'_>; 3] {
    Sentiment::ALL.map(|sentiment| {
        let news = analysis.news(sentiment);
        BucketSummary {
            sentiment,
            percentage: parse_percentage(analysis.percentages.get(sentiment)),
            top_news: &news[..news.len().min(TOP_NEWS_LIMIT)],
            news_count: news.len(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::model::Percentages;

    fn with_percentages(pos: Option<&str>, neg: Option<&str>, neu: Option<&str>) -> Analysis {
        let mut analysis: Analysis =
            serde_json::from_value(serde_json::json!({ "keyword": "k" })).unwrap();
        analysis.percentages = Percentages {
            positive: pos.map(String::from),
            negative: neg.map(String::from),
            neutral: neu.map(String::from),
        };
        analysis
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage(Some("45.2%")), 45.2);
        assert_eq!(parse_percentage(Some("60%")), 60.0);
        assert_eq!(parse_percentage(Some(" 7.5 %")), 7.5);
        assert_eq!(parse_percentage(Some("100")), 100.0);
        assert_eq!(parse_percentage(Some(".5%")), 0.5);
        assert_eq!(parse_percentage(Some("12abc")), 12.0);
        assert_eq!(parse_percentage(Some("")), 0.0);
        assert_eq!(parse_percentage(Some("%")), 0.0);
        assert_eq!(parse_percentage(Some("n/a")), 0.0);
        assert_eq!(parse_percentage(Some("inf%")), 0.0);
        assert_eq!(parse_percentage(None), 0.0);
    }

    #[test]
    fn test_dominant_sentiment_picks_largest() {
        let a = with_percentages(Some("20%"), Some("50%"), Some("30%"));
        assert_eq!(dominant_sentiment(&a), Sentiment::Negative);

        let a = with_percentages(Some("10%"), Some("20%"), Some("70%"));
        assert_eq!(dominant_sentiment(&a), Sentiment::Neutral);
    }

    #[test]
    fn test_dominant_sentiment_ties_go_to_earlier() {
        let a = with_percentages(Some("40%"), Some("40%"), Some("20%"));
        assert_eq!(dominant_sentiment(&a), Sentiment::Positive);

        let a = with_percentages(Some("10%"), Some("45%"), Some("45%"));
        assert_eq!(dominant_sentiment(&a), Sentiment::Negative);

        let a = with_percentages(None, None, None);
        assert_eq!(dominant_sentiment(&a), Sentiment::Positive);
    }

    #[test]
    fn test_dominant_sentiment_is_idempotent() {
        let a = with_percentages(Some("33.3%"), Some("bad"), Some("33.4%"));
        let first = dominant_sentiment(&a);
        assert_eq!(first, dominant_sentiment(&a));
        assert_eq!(first, Sentiment::Neutral);
    }

    #[test]
    fn test_bucket_summaries_cap_news() {
        let mut a = with_percentages(Some("60%"), None, Some("15%"));
        let item = NewsItem {
            title: "t".to_string(),
            link: "l".to_string(),
            snippet: String::new(),
            sentiment: Sentiment::Positive,
            score: 0.5,
        };
        a.top_positive = vec![item; 7];

        let [positive, negative, neutral] = bucket_summaries(&a);
        assert_eq!(positive.label(), "Positivas");
        assert_eq!(positive.percentage, 60.0);
        assert_eq!(positive.top_news.len(), TOP_NEWS_LIMIT);
        assert_eq!(positive.news_count, 7);
        assert_eq!(negative.percentage, 0.0);
        assert_eq!(neutral.sentiment, Sentiment::Neutral);
    }
}
