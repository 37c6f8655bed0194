//! The extraction endpoint (`POST /extract_payment_advice`).
//!
//! Pipeline for one request: read the multipart file part, spool it to
//! disk, extract its text, splice the text into the fixed advice prompt,
//! forward to the completion provider, and return the reply — parsed JSON
//! when the model obeyed the prompt, `{"raw_text": ...}` otherwise. The
//! spooled file is removed as soon as extraction finishes, on every path.

use std::path::Path;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use remitex_core::{LlmProvider, RemitexError};
use remitex_extract::{pdf, spool, SpooledUpload};
use remitex_llm::{advice_request, parse_model_output};
use serde_json::{json, Value};
use tracing::{error, info};

/// Handler for `POST /extract_payment_advice`.
pub async fn extract_payment_advice(
    State(state): State<crate::server::GatewayState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (filename, bytes) = read_file_part(&mut multipart).await?;
    let value = process_upload(&state, &filename, &bytes).await?;
    Ok(Json(value))
}

/// Pull the first file part out of the multipart body.
async fn read_file_part(multipart: &mut Multipart) -> Result<(String, Bytes), RemitexError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RemitexError::UploadRejected(e.to_string()))?
    {
        if field.file_name().is_some() || field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload.pdf").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| RemitexError::UploadRejected(e.to_string()))?;
            return Ok((filename, bytes));
        }
    }
    Err(RemitexError::UploadRejected(
        "multipart body contained no file part".into(),
    ))
}

/// Run the full spool → extract → complete → parse pipeline.
pub async fn process_upload(
    state: &crate::server::GatewayState,
    filename: &str,
    bytes: &[u8],
) -> Result<Value, RemitexError> {
    spool::require_pdf(filename, bytes)?;

    let spooled = SpooledUpload::write(Path::new(&state.config.spool_dir), filename, bytes)
        .map_err(RemitexError::Other)?;

    // PDF parsing is CPU-bound; keep it off the runtime workers.
    let spool_path = spooled.path().to_path_buf();
    let extracted = tokio::task::spawn_blocking(move || pdf::extract_text(&spool_path))
        .await
        .map_err(|e| RemitexError::ExtractionFailed(e.to_string()))?;
    // The upload is only needed for extraction; remove it before the
    // (slow) provider round trip, whether extraction succeeded or not.
    drop(spooled);
    let document = extracted?;

    info!(
        filename = %filename,
        pages = document.page_count,
        chars = document.text.len(),
        "Extracted upload, forwarding to provider"
    );

    complete_and_parse(
        state.provider.as_ref(),
        &state.config.model,
        &document.text,
        filename,
    )
    .await
}

/// Forward extracted text to the provider and parse its reply.
pub async fn complete_and_parse(
    provider: &dyn LlmProvider,
    model: &str,
    text: &str,
    source_file: &str,
) -> Result<Value, RemitexError> {
    let request = advice_request(model, text, source_file);

    let response = provider
        .complete(&request)
        .await
        .map_err(|e| RemitexError::LlmError {
            provider: provider.name().to_string(),
            message: e.to_string(),
        })?;

    info!(
        provider = %response.provider,
        model = %response.model,
        tokens = response.tokens_used,
        latency_ms = response.latency_ms,
        "Provider completed extraction request"
    );

    Ok(parse_model_output(&response.content))
}

/// Error wrapper mapping pipeline failures to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub RemitexError);

impl From<RemitexError> for ApiError {
    fn from(err: RemitexError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RemitexError::UploadRejected(_) => StatusCode::BAD_REQUEST,
            RemitexError::EmptyDocument => StatusCode::UNPROCESSABLE_ENTITY,
            RemitexError::LlmError { .. } => StatusCode::BAD_GATEWAY,
            RemitexError::ExtractionFailed(_)
            | RemitexError::ConfigError(_)
            | RemitexError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error!(error = %self.0, status = %status, "Extraction request failed");
        let body = Json(json!({
            "status": "error",
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remitex_config::Config;
    use remitex_llm::providers::mock::MockProvider;
    use std::sync::Arc;

    fn state_with(provider: MockProvider, spool_subdir: &str) -> crate::server::GatewayState {
        let config = Config {
            spool_dir: std::env::temp_dir()
                .join(format!("remitex-test-{}-{}", std::process::id(), spool_subdir))
                .to_string_lossy()
                .into_owned(),
            ..Config::default()
        };
        crate::server::GatewayState {
            provider: Arc::new(provider),
            config: Arc::new(config),
        }
    }

    #[tokio::test]
    async fn json_reply_is_returned_unaltered() {
        let provider =
            MockProvider::new("mock").with_response(r#"{"status":"success","data":{"success":true}}"#);
        let value = complete_and_parse(&provider, "gpt-oss-120b", "some text", "a.pdf")
            .await
            .unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["success"], true);
    }

    #[tokio::test]
    async fn non_json_reply_is_wrapped_in_raw_text() {
        let provider = MockProvider::new("mock").with_response("no advice found");
        let value = complete_and_parse(&provider, "gpt-oss-120b", "some text", "a.pdf")
            .await
            .unwrap();
        assert_eq!(value, json!({ "raw_text": "no advice found" }));
    }

    #[tokio::test]
    async fn non_pdf_upload_is_rejected_before_provider_call() {
        let state = state_with(MockProvider::new("mock"), "reject");
        let err = process_upload(&state, "advice.pdf", b"plain text, not a pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, RemitexError::UploadRejected(_)));
    }

    #[tokio::test]
    async fn broken_pdf_leaves_no_spool_file_behind() {
        let state = state_with(MockProvider::new("mock"), "broken");
        // Valid magic, invalid body: passes the upload check, fails extraction.
        let err = process_upload(&state, "advice.pdf", b"%PDF-1.4 garbage")
            .await
            .unwrap_err();
        assert!(matches!(err, RemitexError::ExtractionFailed(_)));

        let spool_dir = std::path::Path::new(&state.config.spool_dir);
        let leftovers = std::fs::read_dir(spool_dir)
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn error_variants_map_to_expected_statuses() {
        let cases = [
            (
                ApiError(RemitexError::UploadRejected("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError(RemitexError::EmptyDocument), StatusCode::UNPROCESSABLE_ENTITY),
            (
                ApiError(RemitexError::LlmError {
                    provider: "cerebras".into(),
                    message: "boom".into(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError(RemitexError::ExtractionFailed("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
