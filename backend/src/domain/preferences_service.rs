//! Vacation preference domain services.
//!
//! This module implements the preference driving ports. Submissions are
//! validated in a fixed order (span, destination, vacation type, member) and
//! then written with a single conditional repository call.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    PreferenceCommand, PreferenceQuery, PreferenceRepository, PreferenceRepositoryError,
    SubmitPreferenceRequest, UserRepository, UserRepositoryError, VacationOptions,
};
use crate::domain::{
    CatalogueError, ConsensusEngine, ConsensusError, ConsensusResult, Error, PreferenceWithOwner,
    TravelWindow, TravelWindowError, User, UserCode, VacationCatalogue, VacationPreference,
};

/// Preference service implementing the submission and query ports.
#[derive(Clone)]
pub struct PreferenceService<U, P> {
    users: Arc<U>,
    preferences: Arc<P>,
    catalogue: Arc<VacationCatalogue>,
    engine: ConsensusEngine,
}

impl<U, P> PreferenceService<U, P> {
    /// Create a service over the given repositories and option sets.
    pub fn new(
        users: Arc<U>,
        preferences: Arc<P>,
        catalogue: Arc<VacationCatalogue>,
        engine: ConsensusEngine,
    ) -> Self {
        Self {
            users,
            preferences,
            catalogue,
            engine,
        }
    }
}

impl<U, P> PreferenceService<U, P>
where
    U: UserRepository,
    P: PreferenceRepository,
{
    fn map_user_error(error: UserRepositoryError) -> Error {
        Error::internal(format!("user repository error: {error}"))
    }

    fn map_preferences_error(error: PreferenceRepositoryError) -> Error {
        match error {
            PreferenceRepositoryError::AlreadySubmitted { .. } => {
                Error::conflict("User already has preference you can only edit it.")
            }
            PreferenceRepositoryError::NotSubmitted { .. } => {
                Error::not_found("No preferences found to update")
            }
            other => Error::internal(format!("preference repository error: {other}")),
        }
    }

    fn map_window_error(error: TravelWindowError) -> Error {
        let TravelWindowError::SpanTooLong { days, max } = error;
        Error::invalid_request(
            "The duration from starting date to end date cannot be longer than 1 week",
        )
        .with_details(json!({
            "field": "end_date",
            "code": "span_too_long",
            "days": days,
            "maxDays": max,
        }))
    }

    fn map_catalogue_error(error: CatalogueError) -> Error {
        match error {
            CatalogueError::UnknownDestination { value } => {
                Error::invalid_request("Invalid destination").with_details(json!({
                    "field": "desired_destination",
                    "code": "unknown_destination",
                    "value": value,
                }))
            }
            CatalogueError::UnknownVacationType { value } => {
                Error::invalid_request("Invalid vacation type").with_details(json!({
                    "field": "vacation_type",
                    "code": "unknown_vacation_type",
                    "value": value,
                }))
            }
            CatalogueError::EmptySet { set } => {
                Error::internal(format!("catalogue misconfigured: {set} is empty"))
            }
        }
    }

    fn map_consensus_error(error: ConsensusError) -> Error {
        match error {
            ConsensusError::InsufficientSubmissions {
                required,
                submitted,
            } => Error::insufficient_submissions(format!(
                "Not all group members have submitted preferences ({submitted} of {required})"
            ))
            .with_details(json!({
                "required": required,
                "submitted": submitted,
            })),
            ConsensusError::NoOverlap { start, end } => {
                Error::no_overlap("No overlapping dates between group preferences").with_details(
                    json!({
                        "startDate": start.to_string(),
                        "endDate": end.to_string(),
                    }),
                )
            }
        }
    }

    /// Apply every value rule and resolve the member; the first failure wins.
    async fn validate(&self, request: &SubmitPreferenceRequest) -> Result<VacationPreference, Error> {
        let window = TravelWindow::from_instants(request.starting, request.end)
            .map_err(Self::map_window_error)?;
        let destination = self
            .catalogue
            .destination(&request.destination)
            .map_err(Self::map_catalogue_error)?;
        let vacation_type = self
            .catalogue
            .vacation_type(&request.vacation_type)
            .map_err(Self::map_catalogue_error)?;
        let user = self.resolve_user(&request.user_code).await?;

        Ok(VacationPreference {
            user_id: user.id,
            window,
            destination,
            vacation_type,
        })
    }

    /// Malformed handles are reported like unknown ones.
    async fn resolve_user(&self, raw_code: &str) -> Result<User, Error> {
        let Ok(code) = UserCode::parse(raw_code) else {
            return Err(Error::not_found("User not found"));
        };
        self.users
            .find_by_code(&code)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

#[async_trait]
impl<U, P> PreferenceCommand for PreferenceService<U, P>
where
    U: UserRepository,
    P: PreferenceRepository,
{
    async fn create(&self, request: SubmitPreferenceRequest) -> Result<(), Error> {
        let preference = self.validate(&request).await?;
        self.preferences
            .insert(&preference)
            .await
            .map_err(Self::map_preferences_error)?;
        info!(user_id = %preference.user_id, "preference created");
        Ok(())
    }

    async fn update(&self, request: SubmitPreferenceRequest) -> Result<(), Error> {
        let preference = self.validate(&request).await?;
        self.preferences
            .update(&preference)
            .await
            .map_err(Self::map_preferences_error)?;
        info!(user_id = %preference.user_id, "preference updated");
        Ok(())
    }
}

#[async_trait]
impl<U, P> PreferenceQuery for PreferenceService<U, P>
where
    U: UserRepository,
    P: PreferenceRepository,
{
    async fn list_all(&self) -> Result<Vec<PreferenceWithOwner>, Error> {
        self.preferences
            .list_with_owner()
            .await
            .map_err(Self::map_preferences_error)
    }

    async fn fetch_for_user(&self, user_code: &str) -> Result<VacationPreference, Error> {
        let user = self.resolve_user(user_code).await?;
        self.preferences
            .find_by_user(user.id)
            .await
            .map_err(Self::map_preferences_error)?
            .ok_or_else(|| Error::not_found("No preferences submitted yet"))
    }

    async fn calculate(&self) -> Result<ConsensusResult, Error> {
        let rows = self
            .preferences
            .list_with_owner()
            .await
            .map_err(Self::map_preferences_error)?;
        let submitted: Vec<VacationPreference> =
            rows.into_iter().map(|row| row.preference).collect();
        let plan = self
            .engine
            .compute(&submitted)
            .map_err(Self::map_consensus_error)?;
        info!(
            destination = %plan.destination,
            vacation_type = %plan.vacation_type,
            start = %plan.start_date,
            end = %plan.end_date,
            "group plan computed"
        );
        Ok(plan)
    }

    async fn options(&self) -> Result<VacationOptions, Error> {
        Ok(VacationOptions {
            destinations: self.catalogue.destinations().map(str::to_owned).collect(),
            vacation_types: self.catalogue.vacation_types().map(str::to_owned).collect(),
        })
    }
}

#[cfg(test)]
#[path = "preferences_service_tests.rs"]
mod tests;
