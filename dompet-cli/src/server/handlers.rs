use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use dompet_core::NewTransaction;
use serde_json::json;
use tracing::info;

use super::error::{ApiError, Result};
use super::store::{accept_new, TransactionFilter};
use super::{receipt, AppState};

/// GET /
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Dompet finance tracker API is running",
        "status": "OK"
    }))
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
        "transactions": state.store.len().await
    }))
}

/// GET /api/transactions?type=&category=&month=YYYY-MM
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
) -> impl IntoResponse {
    Json(state.store.list(&filter).await)
}

/// POST /api/transactions
pub async fn create_transaction(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewTransaction>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(new) = payload?;
    let txn = accept_new(new, dompet_core::today())?;
    let txn = state.store.insert(txn).await;
    info!(
        id = %txn.id,
        kind = %txn.kind(),
        amount = txn.amount(),
        category = txn.category(),
        "transaction added"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Transaksi berhasil ditambahkan!",
            "transaction": txn
        })),
    ))
}

/// DELETE /api/transactions/:id
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let removed = state
        .store
        .remove(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(id.clone()))?;
    info!(id = %removed.id, "transaction deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Transaksi berhasil dihapus!"
    })))
}

/// GET /api/statistics
pub async fn statistics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.statistics().await)
}

/// POST /api/upload
/// Multipart field `receipt` holding an image. Returns simulated OCR output; nothing is stored.
pub async fn upload_receipt(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("receipt") {
            continue;
        }

        let is_image = field
            .content_type()
            .is_some_and(|ct| ct.starts_with("image/"));
        if !is_image {
            return Err(ApiError::BadRequest(
                "Hanya file gambar yang diizinkan!".to_string(),
            ));
        }

        let file_name = field.file_name().unwrap_or("receipt").to_string();
        let bytes = field.bytes().await?;
        state.check_size(bytes.len())?;

        let extracted = receipt::extract(&bytes, dompet_core::today());
        info!(
            file = %file_name,
            size = bytes.len(),
            description = %extracted.description,
            "receipt processed"
        );

        return Ok(Json(json!({
            "success": true,
            "message": "Gambar berhasil diproses!",
            "extractedData": extracted,
            "receiptImage": file_name
        })));
    }

    Err(ApiError::BadRequest("Field 'receipt' tidak ditemukan".to_string()))
}

/// POST /api/bank/import
/// Multipart fields `csvFile` and optional `bankName`. Returns parsed records; nothing is stored.
pub async fn import_bank(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut csv_text: Option<String> = None;
    let mut bank_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("csvFile") => {
                let bytes = field.bytes().await?;
                state.check_size(bytes.len())?;
                csv_text = Some(String::from_utf8_lossy(&bytes).into_owned());
            }
            Some("bankName") => {
                bank_name = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let csv_text = csv_text
        .ok_or_else(|| ApiError::BadRequest("Field 'csvFile' tidak ditemukan".to_string()))?;
    let bank = bank_name
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| state.default_bank.clone());

    let out = dompet_ingest::ingest(&csv_text, &bank);
    info!(
        bank = %bank,
        records = out.summary.total,
        income = out.summary.income,
        expense = out.summary.expense,
        "bank CSV imported"
    );

    Ok(Json(json!({
        "success": true,
        "message": format!("{} transaksi berhasil dibaca", out.records.len()),
        "bank": bank.trim().to_lowercase(),
        "transactions": out.records,
        "summary": out.summary
    })))
}
