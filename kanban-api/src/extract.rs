//! Request extractors whose rejections use the API error body
//!
//! axum's own `Json`, `Query` and `Path` reject with plain-text bodies. These
//! wrappers run the same extraction and turn the rejection into an
//! [`ApiError::BadRequest`](crate::error::ApiError::BadRequest).

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
