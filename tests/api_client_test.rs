use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use sentiboard::{AnalysisRequest, ApiClient, Config, DateOption, Error, Result, SentimentApi};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Seen = Arc<Mutex<Vec<Value>>>;

/// Serve `app` on an ephemeral local port and return its base URL
async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base_url: &str) -> ApiClient {
    let config = Config::default()
        .with_api_url(base_url)
        .unwrap()
        .with_timeout_secs(1)
        .unwrap();
    ApiClient::new(&config).unwrap()
}

fn analysis_json(keyword: &str) -> Value {
    json!({
        "_id": format!("id-{keyword}"),
        "keyword": keyword,
        "date": "hoy",
        "total_analizadas": 10,
        "porcentaje": { "positivas": "60%", "negativas": "25%", "neutras": "15%" },
        "top_positivas": [],
        "top_negativas": [],
        "top_neutras": [],
        "createdAt": "2024-03-05T14:30:00.000Z"
    })
}

async fn record_analysis(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
    let keyword = body["keyword"].as_str().unwrap_or_default().to_string();
    seen.lock().unwrap().push(body);
    Json(analysis_json(&keyword))
}

#[tokio::test]
async fn test_submit_analysis_posts_keyword_and_date() -> Result<()> {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/api/news", post(record_analysis))
        .with_state(seen.clone());
    let client = client_for(&spawn_server(app).await);

    let request = AnalysisRequest::new("tecnología", DateOption::Yesterday)?;
    let analysis = client.submit_analysis(&request).await?;

    assert_eq!(analysis.keyword, "tecnología");
    assert_eq!(analysis.total_count(), 10);
    assert_eq!(analysis.percentages.positive.as_deref(), Some("60%"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], json!({ "keyword": "tecnología", "date": "ayer" }));
    Ok(())
}

#[tokio::test]
async fn test_list_analyses_keeps_server_order() -> Result<()> {
    let app = Router::new().route(
        "/api/news",
        get(|| async { Json(json!([analysis_json("b"), analysis_json("a"), analysis_json("c")])) }),
    );
    let client = client_for(&spawn_server(app).await);

    let analyses = client.list_analyses().await?;
    let keywords: Vec<_> = analyses.iter().map(|a| a.keyword.as_str()).collect();
    assert_eq!(keywords, vec!["b", "a", "c"]);
    Ok(())
}

#[tokio::test]
async fn test_list_analyses_accepts_empty_history() -> Result<()> {
    let app = Router::new().route("/api/news", get(|| async { Json(json!([])) }));
    let client = client_for(&spawn_server(app).await);

    assert!(client.list_analyses().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_server_error_maps_to_server() {
    let app = Router::new().route(
        "/api/news",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") })
            .get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let client = client_for(&spawn_server(app).await);
    let request = AnalysisRequest::new("agua", DateOption::Today).unwrap();

    let err = client.submit_analysis(&request).await.unwrap_err();
    assert!(matches!(err, Error::Server { status: 500 }));
    assert_eq!(err.user_message(), "Error del servidor. Intenta nuevamente más tarde.");

    let err = client.list_analyses().await.unwrap_err();
    assert!(matches!(err, Error::Server { status: 503 }));
}

#[tokio::test]
async fn test_bad_request_maps_to_validation() {
    let app = Router::new().route(
        "/api/news",
        post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "message": "keyword required" }))) }),
    );
    let client = client_for(&spawn_server(app).await);
    let request = AnalysisRequest::new("agua", DateOption::Today).unwrap();

    let err = client.submit_analysis(&request).await.unwrap_err();
    assert!(matches!(err, Error::Validation { status: 400 }));
    assert_eq!(err.user_message(), "Datos inválidos. Verifica la información ingresada.");
}

#[tokio::test]
async fn test_slow_server_maps_to_timeout() {
    let app = Router::new().route(
        "/api/news",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!([]))
        }),
    );
    let client = client_for(&spawn_server(app).await);

    let err = client.list_analyses().await.unwrap_err();
    assert!(matches!(err, Error::Timeout));
    assert_eq!(err.user_message(), "La solicitud tardó demasiado tiempo. Intenta nuevamente.");
}

#[tokio::test]
async fn test_unreachable_server_maps_to_connectivity() {
    // Grab a free port and release it so nothing is listening there
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = client_for(&format!("http://{}", addr));

    let err = client.list_analyses().await.unwrap_err();
    assert!(err.is_connectivity());
    assert_eq!(err.user_message(), "No se pudo conectar con el servidor. Verifica tu conexión.");
}

#[tokio::test]
async fn test_undecodable_body_is_invalid_response() {
    let app = Router::new().route("/api/news", get(|| async { "definitely not json" }));
    let client = client_for(&spawn_server(app).await);

    let err = client.list_analyses().await.unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(_)));
}

#[tokio::test]
async fn test_list_analyses_tolerates_nulls_and_missing_keyword() -> Result<()> {
    let mut sparse = analysis_json("sparse");
    sparse["top_negativas"] = Value::Null;
    sparse["top_neutras"] = Value::Null;
    sparse["porcentaje"] = Value::Null;
    sparse["date"] = Value::Null;
    let mut unnamed = analysis_json("unnamed");
    unnamed.as_object_mut().unwrap().remove("keyword");

    let body = json!([analysis_json("full"), sparse, unnamed]);
    let app = Router::new().route(
        "/api/news",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    let client = client_for(&spawn_server(app).await);

    let analyses = client.list_analyses().await?;
    assert_eq!(analyses.len(), 3);
    assert_eq!(analyses[1].keyword, "sparse");
    assert!(analyses[1].top_negative.is_empty());
    assert_eq!(analyses[1].percentages.positive, None);
    assert_eq!(analyses[1].date, "");
    assert_eq!(analyses[2].keyword, "");
    assert_eq!(analyses[2].id, "id-unnamed");
    Ok(())
}
