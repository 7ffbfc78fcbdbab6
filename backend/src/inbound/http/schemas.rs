//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror their
//! serialised shape so the generated document stays accurate while the
//! domain stays free of framework attributes.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// A field is missing, malformed, or outside its allowed values.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The referenced member or preference does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Duplicate username or preference.
    #[schema(rename = "conflict")]
    Conflict,
    /// The group already has its full complement of members.
    #[schema(rename = "capacity_exceeded")]
    CapacityExceeded,
    /// Not every member has submitted a preference yet.
    #[schema(rename = "insufficient_submissions")]
    InsufficientSubmissions,
    /// The submitted windows share no common day.
    #[schema(rename = "no_overlap")]
    NoOverlap,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Invalid destination")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Structured context, such as the offending field.
    details: Option<serde_json::Value>,
}
