//! Driving port for preference submission.
//!
//! Inbound adapters parse and check field presence, then hand the raw values
//! to [`PreferenceCommand`]. The implementation owns every remaining rule: the
//! span limit, catalogue membership, member lookup, and the one-per-member
//! constraint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::Error;

/// A preference submission as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPreferenceRequest {
    /// Public handle of the submitting member, unparsed.
    pub user_code: String,
    /// Requested first day.
    pub starting: DateTime<Utc>,
    /// Requested last day.
    pub end: DateTime<Utc>,
    /// Requested destination, checked against the catalogue.
    pub destination: String,
    /// Requested vacation type, checked against the catalogue.
    pub vacation_type: String,
}

/// Domain use-case port for writing preferences.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferenceCommand: Send + Sync {
    /// Store the member's first preference.
    ///
    /// # Errors
    ///
    /// - `invalid_request` when the window or a catalogue value is rejected.
    /// - `not_found` when the member handle is unknown.
    /// - `conflict` when the member already submitted.
    async fn create(&self, request: SubmitPreferenceRequest) -> Result<(), Error>;

    /// Replace the member's stored preference.
    ///
    /// # Errors
    ///
    /// As for [`PreferenceCommand::create`], except that a missing stored
    /// preference yields `not_found` rather than a conflict.
    async fn update(&self, request: SubmitPreferenceRequest) -> Result<(), Error>;
}

/// Fixture command accepting every submission without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePreferenceCommand;

#[async_trait]
impl PreferenceCommand for FixturePreferenceCommand {
    async fn create(&self, _request: SubmitPreferenceRequest) -> Result<(), Error> {
        Ok(())
    }

    async fn update(&self, _request: SubmitPreferenceRequest) -> Result<(), Error> {
        Ok(())
    }
}
