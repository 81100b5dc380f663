// src/handlers/metadata.rs

use axum::{Json, extract::{Multipart, State}, response::IntoResponse};
use serde_json::json;

use crate::{
    error::AppError,
    models::quiz::{UploadMetadataForm, multipart_fields},
    state::AppState,
};

/// Pins a quiz metadata document to content-addressed storage.
///
/// Pass-through to the pinning service; the document itself (questions plus
/// the already-encrypted answer key) is assembled by the frontend.
pub async fn upload_metadata(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let fields = multipart_fields(&mut multipart).await?;
    let (content, name) = UploadMetadataForm::from_fields(fields).into_parts()?;

    let cid = state.metadata.publish(&content, &name).await?;

    tracing::info!("Pinned quiz metadata '{}' as {}", name, cid);

    Ok(Json(json!({
        "cid": cid,
        "uri": format!("ipfs://{}", cid),
    })))
}
