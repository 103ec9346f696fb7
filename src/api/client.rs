use crate::api::model::{Analysis, AnalysisRequest};
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

const NEWS_PATH: &str = "/api/news";

/// Operations the dashboard needs from the sentiment-analysis service
#[async_trait]
pub trait SentimentApi: Send + Sync {
    /// Run a new analysis for a keyword and day
    async fn submit_analysis(&self, request: &AnalysisRequest) -> Result<Analysis>;

    /// Fetch every stored analysis, in the order the service returns them
    async fn list_analyses(&self) -> Result<Vec<Analysis>>;
}

/// HTTP client for the sentiment-analysis service
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    news_url: String,
}

impl ApiClient {
    /// Create a client with the configured base URL and deadline
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            news_url: config.endpoint(NEWS_PATH),
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = check_status(response)?;
        response.json::<T>().await.map_err(classify_transport)
    }
}

#[async_trait]
impl SentimentApi for ApiClient {
    #[instrument(skip(self), fields(keyword = %request.keyword(), date = %request.date()))]
    async fn submit_analysis(&self, request: &AnalysisRequest) -> Result<Analysis> {
        debug!(url = %self.news_url, "submitting analysis");
        let response = self
            .client
            .post(&self.news_url)
            .json(request)
            .send()
            .await
            .map_err(classify_transport)?;

        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn list_analyses(&self) -> Result<Vec<Analysis>> {
        debug!(url = %self.news_url, "listing analyses");
        let response = self
            .client
            .get(&self.news_url)
            .send()
            .await
            .map_err(classify_transport)?;

        let analyses: Vec<Analysis> = Self::decode(response).await?;
        debug!(count = analyses.len(), "received analyses");
        Ok(analyses)
    }
}

fn check_status(response: Response) -> Result<Response> {
    match classify_status(response.status()) {
        Some(err) => {
            debug!(status = %response.status(), "service returned an error status");
            Err(err)
        }
        None => Ok(response),
    }
}

/// Map a non-success HTTP status onto the error taxonomy
pub fn classify_status(status: StatusCode) -> Option<Error> {
    if status.is_server_error() {
        Some(Error::Server { status: status.as_u16() })
    } else if status.is_client_error() {
        Some(Error::Validation { status: status.as_u16() })
    } else {
        None
    }
}

/// Map a transport-level failure onto the error taxonomy
fn classify_transport(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else if err.is_decode() {
        Error::InvalidResponse(err.to_string())
    } else if let Some(status) = err.status() {
        classify_status(status).unwrap_or_else(|| Error::InvalidResponse(err.to_string()))
    } else {
        debug!(error = %err, "no response from service");
        Error::Connectivity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            Some(Error::Server { status: 500 })
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY),
            Some(Error::Server { status: 502 })
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST),
            Some(Error::Validation { status: 400 })
        ));
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND),
            Some(Error::Validation { status: 404 })
        ));
        assert!(classify_status(StatusCode::OK).is_none());
        assert!(classify_status(StatusCode::CREATED).is_none());
    }

    #[test]
    fn test_client_targets_news_endpoint() {
        let config = Config::default().with_api_url("http://127.0.0.1:9/").unwrap();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.news_url, "http://127.0.0.1:9/api/news");
    }
}
