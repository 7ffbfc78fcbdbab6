//! Driving port for preference reads and the group plan.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{ConsensusResult, Error, PreferenceWithOwner, VacationPreference};

/// Configured choices offered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationOptions {
    /// Allowed destinations in lexical order.
    pub destinations: Vec<String>,
    /// Allowed vacation types in lexical order.
    pub vacation_types: Vec<String>,
}

/// Domain use-case port for reading preferences.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferenceQuery: Send + Sync {
    /// Every stored preference with its owner, in submission order.
    async fn list_all(&self) -> Result<Vec<PreferenceWithOwner>, Error>;

    /// The preference stored by the member holding `user_code`.
    async fn fetch_for_user(&self, user_code: &str) -> Result<VacationPreference, Error>;

    /// Compute the group plan from every stored preference.
    async fn calculate(&self) -> Result<ConsensusResult, Error>;

    /// The configured destinations and vacation types.
    async fn options(&self) -> Result<VacationOptions, Error>;
}

/// Fixture query backed by an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePreferenceQuery;

#[async_trait]
impl PreferenceQuery for FixturePreferenceQuery {
    async fn list_all(&self) -> Result<Vec<PreferenceWithOwner>, Error> {
        Ok(Vec::new())
    }

    async fn fetch_for_user(&self, _user_code: &str) -> Result<VacationPreference, Error> {
        Err(Error::not_found("user not found"))
    }

    async fn calculate(&self) -> Result<ConsensusResult, Error> {
        Err(Error::insufficient_submissions("not enough preferences submitted"))
    }

    async fn options(&self) -> Result<VacationOptions, Error> {
        Ok(VacationOptions {
            destinations: Vec::new(),
            vacation_types: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_query_has_nothing_to_plan() {
        let query = FixturePreferenceQuery;
        assert!(query.list_all().await.expect("list").is_empty());
        let err = query.calculate().await.expect_err("empty store");
        assert_eq!(err.code(), ErrorCode::InsufficientSubmissions);
    }
}
