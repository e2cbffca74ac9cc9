//! Logo upload
//!
//! ```text
//! POST /api/upload/logo
//! Content-Type: multipart/form-data; boundary=...
//!
//! logo=<image file>
//! ```
//!
//! ```json
//! { "url": "/uploads/logos/1718000000000-cattery.png" }
//! ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    storage::logo_key,
};
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Extension, Json,
};
use chrono::Utc;
use moracat_shared::auth::context::AuthContext;
use serde::Serialize;

/// Name of the multipart field carrying the file
pub const LOGO_FIELD: &str = "logo";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

fn invalid_upload(err: MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Invalid upload: {}", err.body_text()))
}

/// # Errors
///
/// - `400 Bad Request`: no `logo` file, not an image, too large, or a
///   malformed multipart body
pub async fn upload_logo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await.map_err(invalid_upload)? {
        if field.name() != Some(LOGO_FIELD) {
            continue;
        }
        // A plain form value named "logo" is not a file
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let is_image = field
            .content_type()
            .is_some_and(|content_type| content_type.starts_with("image/"));

        let data = field.bytes().await.map_err(invalid_upload)?;

        // Browsers send an empty part when no file was picked
        if data.is_empty() {
            break;
        }
        if !is_image {
            return Err(ApiError::BadRequest("Logo must be an image".to_string()));
        }
        if data.len() > state.config.uploads.max_bytes {
            return Err(ApiError::BadRequest(format!(
                "Logo must be at most {} bytes",
                state.config.uploads.max_bytes
            )));
        }

        let key = logo_key(&file_name, Utc::now().timestamp_millis());
        let size = data.len();
        let url = state.logos.put(&key, data).await?;

        tracing::info!(user_id = auth.user_id, key = %key, bytes = size, "Logo uploaded");

        return Ok(Json(UploadResponse { url }));
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}
