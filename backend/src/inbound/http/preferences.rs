//! Vacation preference HTTP handlers.
//!
//! ```text
//! POST /api/preferences/create
//! PUT  /api/preferences/update
//! GET  /api/preferences/all
//! GET  /api/preferences/calculate
//! GET  /api/preferences/options
//! GET  /api/preferences/{userCode}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{SubmitPreferenceRequest, VacationOptions};
use crate::domain::{ConsensusResult, PreferenceWithOwner, VacationPreference};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_text, require_travel_date};

const USER_CODE: FieldName = FieldName::new("userCode");
const STARTING_DATE: FieldName = FieldName::new("starting_date");
const END_DATE: FieldName = FieldName::new("end_date");
const DESTINATION: FieldName = FieldName::new("desired_destination");
const VACATION_TYPE: FieldName = FieldName::new("vacation_type");

/// Request payload for creating or replacing a preference.
///
/// Dates accept `YYYY-MM-DD` or RFC 3339 timestamps.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct PreferenceSubmission {
    /// Handle issued at signup.
    #[serde(rename = "userCode")]
    pub user_code: Option<String>,
    /// First requested day.
    #[schema(example = "2024-06-01")]
    pub starting_date: Option<String>,
    /// Last requested day; at most seven days from `starting_date`.
    #[schema(example = "2024-06-07")]
    pub end_date: Option<String>,
    /// One of the configured destinations.
    pub desired_destination: Option<String>,
    /// One of the configured vacation types.
    pub vacation_type: Option<String>,
}

/// Acknowledgement body for successful writes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// A stored preference.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PreferenceResponse {
    /// First requested day (`YYYY-MM-DD`).
    pub starting_date: String,
    /// Last requested day (`YYYY-MM-DD`).
    pub end_date: String,
    /// Chosen destination.
    pub desired_destination: String,
    /// Chosen vacation type.
    pub vacation_type: String,
}

impl From<VacationPreference> for PreferenceResponse {
    fn from(value: VacationPreference) -> Self {
        Self {
            starting_date: value.window.starting_date().to_string(),
            end_date: value.window.end_date().to_string(),
            desired_destination: value.destination.to_string(),
            vacation_type: value.vacation_type.to_string(),
        }
    }
}

/// A stored preference joined with its owner's display name.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PreferenceListingResponse {
    /// Row identifier; ascending in submission order.
    pub id: i64,
    /// Owner display name.
    pub username: String,
    /// The stored values.
    #[serde(flatten)]
    pub preference: PreferenceResponse,
}

impl From<PreferenceWithOwner> for PreferenceListingResponse {
    fn from(value: PreferenceWithOwner) -> Self {
        Self {
            id: value.id,
            username: value.username.to_string(),
            preference: PreferenceResponse::from(value.preference),
        }
    }
}

/// The computed group plan.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusResponse {
    /// Most popular destination; earliest submission wins ties.
    pub destination: String,
    /// Most popular vacation type; earliest submission wins ties.
    pub vacation_type: String,
    /// Latest submitted start date (`YYYY-MM-DD`).
    #[schema(example = "2024-06-05")]
    pub start_date: String,
    /// Earliest submitted end date (`YYYY-MM-DD`).
    #[schema(example = "2024-06-07")]
    pub end_date: String,
}

impl From<ConsensusResult> for ConsensusResponse {
    fn from(value: ConsensusResult) -> Self {
        Self {
            destination: value.destination.to_string(),
            vacation_type: value.vacation_type.to_string(),
            start_date: value.start_date.to_string(),
            end_date: value.end_date.to_string(),
        }
    }
}

/// Configured choices.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    /// Allowed destinations.
    pub destinations: Vec<String>,
    /// Allowed vacation types.
    pub vacation_types: Vec<String>,
}

impl From<VacationOptions> for OptionsResponse {
    fn from(value: VacationOptions) -> Self {
        Self {
            destinations: value.destinations,
            vacation_types: value.vacation_types,
        }
    }
}

fn parse_submission(payload: PreferenceSubmission) -> Result<SubmitPreferenceRequest, Error> {
    let user_code = require_text(payload.user_code, USER_CODE)?;
    let starting = require_travel_date(payload.starting_date, STARTING_DATE)?;
    let end = require_travel_date(payload.end_date, END_DATE)?;
    let destination = require_text(payload.desired_destination, DESTINATION)?;
    let vacation_type = require_text(payload.vacation_type, VACATION_TYPE)?;
    Ok(SubmitPreferenceRequest {
        user_code,
        starting,
        end,
        destination,
        vacation_type,
    })
}

/// Submit a member's preference.
#[utoipa::path(
    post,
    path = "/api/preferences/create",
    request_body = PreferenceSubmission,
    responses(
        (status = 201, description = "Preference stored", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown member", body = ErrorSchema),
        (status = 409, description = "Preference already submitted", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["preferences"],
    operation_id = "createPreference"
)]
#[post("/preferences/create")]
pub async fn create_preference(
    state: web::Data<HttpState>,
    payload: web::Json<PreferenceSubmission>,
) -> ApiResult<HttpResponse> {
    let request = parse_submission(payload.into_inner())?;
    state.preferences.create(request).await?;
    Ok(HttpResponse::Created().json(MessageResponse {
        message: "Preferences created successfully".to_owned(),
    }))
}

/// Replace a member's stored preference.
#[utoipa::path(
    put,
    path = "/api/preferences/update",
    request_body = PreferenceSubmission,
    responses(
        (status = 200, description = "Preference replaced", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown member or nothing to update", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["preferences"],
    operation_id = "updatePreference"
)]
#[put("/preferences/update")]
pub async fn update_preference(
    state: web::Data<HttpState>,
    payload: web::Json<PreferenceSubmission>,
) -> ApiResult<web::Json<MessageResponse>> {
    let request = parse_submission(payload.into_inner())?;
    state.preferences.update(request).await?;
    Ok(web::Json(MessageResponse {
        message: "Preferences updated successfully".to_owned(),
    }))
}

/// List every stored preference with its owner.
#[utoipa::path(
    get,
    path = "/api/preferences/all",
    responses(
        (status = 200, description = "Stored preferences in submission order", body = [PreferenceListingResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["preferences"],
    operation_id = "listPreferences"
)]
#[get("/preferences/all")]
pub async fn list_preferences(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PreferenceListingResponse>>> {
    let rows = state.preferences_query.list_all().await?;
    Ok(web::Json(
        rows.into_iter()
            .map(PreferenceListingResponse::from)
            .collect(),
    ))
}

/// Compute the group plan.
#[utoipa::path(
    get,
    path = "/api/preferences/calculate",
    responses(
        (status = 200, description = "Group plan", body = ConsensusResponse),
        (status = 400, description = "Not every member has submitted, or windows do not overlap", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["preferences"],
    operation_id = "calculateConsensus"
)]
#[get("/preferences/calculate")]
pub async fn calculate_consensus(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ConsensusResponse>> {
    let plan = state.preferences_query.calculate().await?;
    Ok(web::Json(ConsensusResponse::from(plan)))
}

/// List the configured destinations and vacation types.
#[utoipa::path(
    get,
    path = "/api/preferences/options",
    responses(
        (status = 200, description = "Configured choices", body = OptionsResponse)
    ),
    tags = ["preferences"],
    operation_id = "listOptions"
)]
#[get("/preferences/options")]
pub async fn list_options(state: web::Data<HttpState>) -> ApiResult<web::Json<OptionsResponse>> {
    let options = state.preferences_query.options().await?;
    Ok(web::Json(OptionsResponse::from(options)))
}

/// Fetch the preference stored by a member.
///
/// Register after the fixed `/preferences/*` routes so they take precedence.
#[utoipa::path(
    get,
    path = "/api/preferences/{userCode}",
    params(("userCode" = String, Path, description = "Handle issued at signup")),
    responses(
        (status = 200, description = "Stored preference", body = PreferenceResponse),
        (status = 404, description = "Unknown member or nothing submitted", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["preferences"],
    operation_id = "getOwnPreference"
)]
#[get("/preferences/{user_code}")]
pub async fn get_own_preference(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PreferenceResponse>> {
    let preference = state
        .preferences_query
        .fetch_for_user(&path.into_inner())
        .await?;
    Ok(web::Json(PreferenceResponse::from(preference)))
}

#[cfg(test)]
#[path = "preferences_tests.rs"]
mod tests;
