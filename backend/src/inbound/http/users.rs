//! Member signup handler.
//!
//! ```text
//! POST /api/users/signup {"username":"maya","password":"hunter2"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{CredentialsValidationError, Error, SignupCredentials, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const SIGNUP_CREATED: &str = "User created successfully save the userCode for future use.";

/// Signup request body for `POST /api/users/signup`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    /// Requested display name; trimmed, unique across the group.
    #[schema(example = "maya")]
    pub username: Option<String>,
    /// Secret stored only as a salted digest.
    #[schema(example = "hunter2")]
    pub password: Option<String>,
}

/// Signup acknowledgement carrying the member's handle.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    /// Confirmation text.
    pub message: String,
    /// Handle to present on every later preference call.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_code: String,
}

fn credentials_from(request: SignupRequest) -> Result<SignupCredentials, Error> {
    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(missing_credentials());
    };
    if username.trim().is_empty() || password.is_empty() {
        return Err(missing_credentials());
    }
    SignupCredentials::try_from_parts(&username, &password).map_err(map_credentials_error)
}

fn missing_credentials() -> Error {
    Error::invalid_request("Username and password are required")
        .with_details(json!({ "code": "missing_field" }))
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let message = err.to_string();
    let code = match err {
        CredentialsValidationError::EmptyPassword => "empty_password",
        CredentialsValidationError::Username(UserValidationError::EmptyUsername) => {
            "empty_username"
        }
        CredentialsValidationError::Username(UserValidationError::UsernameTooLong { .. }) => {
            "username_too_long"
        }
        CredentialsValidationError::Username(UserValidationError::InvalidCode) => "invalid_code",
    };
    let field = match err {
        CredentialsValidationError::EmptyPassword => "password",
        CredentialsValidationError::Username(_) => "username",
    };
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

/// Register a new group member.
#[utoipa::path(
    post,
    path = "/api/users/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Member registered", body = SignupResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Group is full", body = ErrorSchema),
        (status = 409, description = "Username already exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signup"
)]
#[post("/users/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = credentials_from(payload.into_inner())?;
    debug!(username = %credentials.username(), "signup requested");
    let code = state.signup.signup(credentials).await?;
    Ok(HttpResponse::Created().json(SignupResponse {
        message: SIGNUP_CREATED.to_owned(),
        user_code: code.to_string(),
    }))
}
