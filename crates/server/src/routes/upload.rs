//! Payment-proof image upload handler.

use axum::{
    Json,
    extract::{Multipart, State},
};
use chrono::Utc;
use rand::Rng;
use serde::Serialize;

use unique_items_core::upload::{is_allowed_image_type, proof_object_name};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Response carrying the public URL of the stored image.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Accept a multipart `file` part and store it in blob storage.
///
/// Only JPEG, PNG, and WebP images are accepted. The stored object name
/// carries a timestamp and random suffix so concurrent uploads never
/// collide.
///
/// # Errors
///
/// Returns 400 when the part is missing, the content type is not an
/// accepted image format, or the blob store rejects the upload.
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Validation("Upload failed".to_owned()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .map(str::to_owned)
            .filter(|ct| is_allowed_image_type(ct))
            .ok_or_else(|| AppError::Validation("Invalid file type".to_owned()))?;

        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::Validation("Upload failed".to_owned()))?;

        file = Some((content_type, data.to_vec()));
        break;
    }

    let Some((content_type, data)) = file else {
        return Err(AppError::Validation("No file provided".to_owned()));
    };

    // The content type was vetted above, so a name always comes back.
    let name = proof_object_name(Utc::now(), rand::rng().random(), &content_type)
        .ok_or_else(|| AppError::Validation("Invalid file type".to_owned()))?;

    let url = state.blob().put(&name, &content_type, data).await?;

    add_breadcrumb("upload", "Payment proof stored", Some(&[("object", &name)]));

    Ok(Json(UploadResponse { url }))
}
