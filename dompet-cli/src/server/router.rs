use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::{handlers, AppState};

/// Room for multipart boundaries and the non-file fields
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the main application router with all API endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);
    let static_dir = state.static_dir.clone();

    let router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(
            "/api/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/api/transactions/:id", delete(handlers::delete_transaction))
        .route("/api/statistics", get(handlers::statistics))
        // Ingestion: parse only, the client confirms by posting each record
        .route("/api/upload", post(handlers::upload_receipt))
        .route("/api/bank/import", post(handlers::import_bank))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::store::TransactionStore;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "dompet-test-boundary";

    struct Part<'a> {
        name: &'a str,
        file_name: Option<&'a str>,
        content_type: Option<&'a str>,
        data: &'a [u8],
    }

    fn app_with(config: &Config) -> (Router, Arc<TransactionStore>) {
        let store = Arc::new(TransactionStore::new());
        let app = create_router(AppState::new(store.clone(), config));
        (app, store)
    }

    fn app() -> (Router, Arc<TransactionStore>) {
        app_with(&Config::default())
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_req(uri: &str, parts: &[Part]) -> Request<Body> {
        let mut body = Vec::new();
        for p in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", p.name);
            if let Some(f) = p.file_name {
                disposition.push_str(&format!("; filename=\"{f}\""));
            }
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(b"\r\n");
            if let Some(ct) = p.content_type {
                body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
            }
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(p.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let (app, _) = app();
        let (status, body) = send(&app, get_req("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");

        let (status, body) = send(&app, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transactions"], 0);
    }

    #[tokio::test]
    async fn test_create_list_and_statistics() {
        let (app, _) = app();

        let (status, body) = send(
            &app,
            json_req(
                Method::POST,
                "/api/transactions",
                json!({
                    "type": "pemasukan",
                    "amount": 5000000,
                    "description": "Gaji Bulan Januari",
                    "date": "2024-01-15",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["transaction"]["category"], "gaji");

        let (_, body) = send(
            &app,
            json_req(
                Method::POST,
                "/api/transactions",
                json!({
                    "type": "pengeluaran",
                    "amount": 45000,
                    "description": "Makan siang",
                    "date": "2024-01-16",
                }),
            ),
        )
        .await;
        assert_eq!(body["transaction"]["category"], "makanan");

        let (status, list) = send(&app, get_req("/api/transactions")).await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["date"], "2024-01-16");

        let (_, stats) = send(&app, get_req("/api/statistics")).await;
        assert_eq!(stats["totalIncome"], 5_000_000.0);
        assert_eq!(stats["totalExpense"], 45_000.0);
        assert_eq!(stats["balance"], 4_955_000.0);
        assert_eq!(stats["transactionCount"], 2);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_amount() {
        let (app, store) = app();
        let (status, body) = send(
            &app,
            json_req(
                Method::POST,
                "/api/transactions",
                json!({"type": "pengeluaran", "amount": 0, "description": "Kopi"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_create_with_blank_form_fields() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            json_req(
                Method::POST,
                "/api/transactions",
                json!({
                    "type": "pengeluaran",
                    "amount": 45000,
                    "description": "Makan",
                    "category": "",
                    "date": "",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["transaction"]["category"], "makanan");
        assert_eq!(
            body["transaction"]["date"],
            dompet_core::today().format("%Y-%m-%d").to_string()
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let (app, store) = app();
        let (status, body) = send(
            &app,
            json_req(
                Method::POST,
                "/api/transactions",
                json!({"type": "pengeluaran", "amount": null, "description": "Makan"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("amount"));

        let (status, body) = send(
            &app,
            json_req(
                Method::POST,
                "/api/transactions",
                json!({"type": "pengeluaran", "amount": 1, "description": "x", "date": "kemarin"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_list_query_filters() {
        let (app, _) = app();
        for (kind, amount, description, date) in [
            ("pemasukan", 5000000, "Gaji", "2024-01-15"),
            ("pengeluaran", 45000, "Makan siang", "2024-01-16"),
            ("pengeluaran", 20000, "Parkir", "2024-02-01"),
        ] {
            send(
                &app,
                json_req(
                    Method::POST,
                    "/api/transactions",
                    json!({
                        "type": kind,
                        "amount": amount,
                        "description": description,
                        "date": date,
                    }),
                ),
            )
            .await;
        }

        let (_, list) = send(&app, get_req("/api/transactions?type=pengeluaran")).await;
        assert_eq!(list.as_array().unwrap().len(), 2);

        let (_, list) = send(&app, get_req("/api/transactions?month=2024-01&category=")).await;
        assert_eq!(list.as_array().unwrap().len(), 2);

        let (_, list) = send(&app, get_req("/api/transactions?category=transportasi")).await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["description"], "Parkir");
    }

    #[tokio::test]
    async fn test_delete() {
        let (app, _) = app();
        let (status, _) = send(
            &app,
            Request::builder()
                .method(Method::DELETE)
                .uri("/api/transactions/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, created) = send(
            &app,
            json_req(
                Method::POST,
                "/api/transactions",
                json!({"type": "pengeluaran", "amount": 10000, "description": "Parkir"}),
            ),
        )
        .await;
        let id = created["transaction"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/transactions/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, list) = send(&app, get_req("/api/transactions")).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bank_import_parses_without_storing() {
        let (app, store) = app();
        let csv = "Tanggal,Keterangan,Cabang,Jumlah,DB/CR,Saldo\n\
                   15/01/2024,\"Belanja Bulanan\",Main,150000,D,999999\n\
                   16/01/2024,\"Gaji\",Main,5000000,C,5999999\n";

        let req = multipart_req(
            "/api/bank/import",
            &[
                Part { name: "bankName", file_name: None, content_type: None, data: b"bca" },
                Part {
                    name: "csvFile",
                    file_name: Some("mutasi.csv"),
                    content_type: Some("text/csv"),
                    data: csv.as_bytes(),
                },
            ],
        );
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bank"], "bca");
        assert_eq!(body["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(body["transactions"][0]["type"], "pengeluaran");
        assert_eq!(body["transactions"][0]["date"], "2024-01-15");
        assert_eq!(body["summary"]["total"], 2);
        assert_eq!(body["summary"]["income"], 5_000_000.0);
        assert_eq!(body["summary"]["expense"], 150_000.0);

        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_bank_import_defaults_bank_and_requires_file() {
        let (app, _) = app();
        let req = multipart_req(
            "/api/bank/import",
            &[Part { name: "bankName", file_name: None, content_type: None, data: b"bca" }],
        );
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let req = multipart_req(
            "/api/bank/import",
            &[Part {
                name: "csvFile",
                file_name: Some("mutasi.csv"),
                content_type: Some("text/csv"),
                data: b"h\n15/01/2024,Kopi,Main,20000,D,1\n",
            }],
        );
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bank"], "bca");
        assert_eq!(body["transactions"][0]["amount"], 20000.0);
    }

    #[tokio::test]
    async fn test_receipt_upload() {
        let (app, store) = app();
        let req = multipart_req(
            "/api/upload",
            &[Part {
                name: "receipt",
                file_name: Some("struk.png"),
                content_type: Some("image/png"),
                data: b"\x89PNG\r\n\x1a\nfake",
            }],
        );
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["receiptImage"], "struk.png");
        assert!(body["extractedData"]["amount"].as_f64().unwrap() > 0.0);
        assert!(body["extractedData"].get("bank").is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_receipt_upload_rejects_non_images() {
        let (app, _) = app();
        let req = multipart_req(
            "/api/upload",
            &[Part {
                name: "receipt",
                file_name: Some("notes.txt"),
                content_type: Some("text/plain"),
                data: b"hello",
            }],
        );
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_upload_size_limit() {
        let mut config = Config::default();
        config.server.max_upload_bytes = 8;
        let (app, _) = app_with(&config);

        let req = multipart_req(
            "/api/upload",
            &[Part {
                name: "receipt",
                file_name: Some("big.jpg"),
                content_type: Some("image/jpeg"),
                data: &[0u8; 64],
            }],
        );
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
