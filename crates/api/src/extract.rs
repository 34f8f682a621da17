//! Request body extractors for record and account payloads.

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::uploads::UploadedFile;

/// Multipart field carrying the poster image.
pub const POSTER_FIELD: &str = "poster";

/// `Path` whose rejection is rendered as a JSON [`AppError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// `Query` whose rejection is rendered as a JSON [`AppError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// A JSON request body that must be an object.
///
/// Field-level checks are left to the validation engine, so this only rejects
/// malformed JSON and non-object bodies.
#[derive(Debug)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(json_error)?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            _ => Err(AppError::BadRequest(
                "Request body must be a JSON object".into(),
            )),
        }
    }
}

/// A record write body, sent either as a JSON object or as a multipart form.
///
/// Multipart text fields become string values (numeric strings are coerced
/// later by the validation engine). A file in the `poster` field is returned
/// separately; a `poster` text field stays in `fields` like any other value.
#[derive(Debug)]
pub struct RecordPayload {
    pub fields: Map<String, Value>,
    pub poster: Option<UploadedFile>,
}

impl<S> FromRequest<S> for RecordPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let JsonObject(fields) = JsonObject::from_request(req, state).await?;
            return Ok(RecordPayload {
                fields,
                poster: None,
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        let mut fields = Map::new();
        let mut poster = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();
            if name.is_empty() {
                continue;
            }

            match field.file_name().map(str::to_string) {
                Some(file_name) if name == POSTER_FIELD => {
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    // Browsers send an empty part when no file was picked.
                    if !(file_name.is_empty() && bytes.is_empty()) {
                        poster = Some(UploadedFile { file_name, bytes });
                    }
                }
                Some(_) => {
                    tracing::debug!(field = %name, "Ignoring unexpected file field");
                }
                None => {
                    let text = field.text().await.map_err(multipart_error)?;
                    fields.insert(name, Value::String(text));
                }
            }
        }

        Ok(RecordPayload { fields, poster })
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

fn json_error(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(rejection.body_text())
    } else {
        AppError::BadRequest(rejection.body_text())
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}
