//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every signup, preference, and health endpoint plus
//! the request and response bodies they exchange. The document backs Swagger
//! UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::preferences::{
    ConsensusResponse, MessageResponse, OptionsResponse, PreferenceListingResponse,
    PreferenceResponse, PreferenceSubmission,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{SignupRequest, SignupResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vacation planner API",
        description = "Group signup, preference submission, and consensus planning."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::preferences::create_preference,
        crate::inbound::http::preferences::update_preference,
        crate::inbound::http::preferences::list_preferences,
        crate::inbound::http::preferences::calculate_consensus,
        crate::inbound::http::preferences::list_options,
        crate::inbound::http::preferences::get_own_preference,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        SignupRequest,
        SignupResponse,
        PreferenceSubmission,
        PreferenceResponse,
        PreferenceListingResponse,
        ConsensusResponse,
        OptionsResponse,
        MessageResponse
    )),
    tags(
        (name = "users", description = "Member registration"),
        (name = "preferences", description = "Preference submission and group planning"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
