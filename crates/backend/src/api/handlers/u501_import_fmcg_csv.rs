use axum::{extract::Multipart, Json};
use contracts::dashboards::d400_fmcg_trends::ImportSummary;

use crate::shared::data::db::get_connection;
use crate::shared::error::{AppError, AppResult};
use crate::usecases::u501_import_fmcg_csv;

/// POST /api/fmcg/import (multipart, field `file`), admin only
pub async fn import(mut multipart: Multipart) -> AppResult<Json<ImportSummary>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, bytes.to_vec()));
    }

    let (file_name, bytes) = upload.ok_or_else(|| AppError::bad_request("No file provided"))?;
    if bytes.is_empty() {
        return Err(AppError::bad_request("Uploaded file is empty"));
    }
    tracing::info!("Importing {} ({} bytes)", file_name, bytes.len());

    let summary = u501_import_fmcg_csv::import_csv(get_connection(), &bytes).await?;
    Ok(Json(summary))
}
