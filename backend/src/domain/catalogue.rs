//! Fixed vacation option sets.
//!
//! The allowed destinations and vacation types are configuration data loaded
//! once at start-up and injected into the services that validate submissions.
//! Tests substitute small fixtures through [`VacationCatalogue::new`].

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors raised when a value is outside the configured set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    /// The destination is not offered.
    #[error("unknown destination: {value}")]
    UnknownDestination {
        /// Rejected input.
        value: String,
    },
    /// The vacation type is not offered.
    #[error("unknown vacation type: {value}")]
    UnknownVacationType {
        /// Rejected input.
        value: String,
    },
    /// A configured option set has no entries.
    #[error("{set} must contain at least one entry")]
    EmptySet {
        /// Name of the empty set.
        set: &'static str,
    },
}

macro_rules! catalogue_value {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a value that was validated before it was stored.
            pub fn from_stored(value: impl Into<String>) -> Self {
                Self(value.into())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

catalogue_value! {
    /// A destination drawn from the configured set.
    Destination
}

catalogue_value! {
    /// A vacation type drawn from the configured set.
    VacationType
}

/// Configured destinations and vacation types.
///
/// # Examples
/// ```
/// use vacation_planner::domain::VacationCatalogue;
///
/// let catalogue = VacationCatalogue::new(["Lisbon", "Kyoto"], ["beach", "city"]).unwrap();
/// assert!(catalogue.destination("Kyoto").is_ok());
/// assert!(catalogue.vacation_type("ski").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacationCatalogue {
    destinations: BTreeSet<String>,
    vacation_types: BTreeSet<String>,
}

impl VacationCatalogue {
    /// Build a catalogue; both sets must be non-empty.
    pub fn new<D, T>(destinations: D, vacation_types: T) -> Result<Self, CatalogueError>
    where
        D: IntoIterator,
        D::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let destinations: BTreeSet<String> = destinations.into_iter().map(Into::into).collect();
        let vacation_types: BTreeSet<String> =
            vacation_types.into_iter().map(Into::into).collect();
        if destinations.is_empty() {
            return Err(CatalogueError::EmptySet {
                set: "destinations",
            });
        }
        if vacation_types.is_empty() {
            return Err(CatalogueError::EmptySet {
                set: "vacation types",
            });
        }
        Ok(Self {
            destinations,
            vacation_types,
        })
    }

    /// Validate a destination against the configured set. Matching is exact.
    pub fn destination(&self, value: &str) -> Result<Destination, CatalogueError> {
        if self.destinations.contains(value) {
            Ok(Destination(value.to_owned()))
        } else {
            Err(CatalogueError::UnknownDestination {
                value: value.to_owned(),
            })
        }
    }

    /// Validate a vacation type against the configured set. Matching is exact.
    pub fn vacation_type(&self, value: &str) -> Result<VacationType, CatalogueError> {
        if self.vacation_types.contains(value) {
            Ok(VacationType(value.to_owned()))
        } else {
            Err(CatalogueError::UnknownVacationType {
                value: value.to_owned(),
            })
        }
    }

    /// Configured destinations in lexical order.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.destinations.iter().map(String::as_str)
    }

    /// Configured vacation types in lexical order.
    pub fn vacation_types(&self) -> impl Iterator<Item = &str> {
        self.vacation_types.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalogue() -> VacationCatalogue {
        VacationCatalogue::new(["Lisbon", "Kyoto", "Reykjavik"], ["beach", "city", "hiking"])
            .expect("fixture catalogue")
    }

    #[rstest]
    fn accepts_configured_values(catalogue: VacationCatalogue) {
        assert_eq!(
            catalogue.destination("Lisbon").expect("known").as_ref(),
            "Lisbon"
        );
        assert_eq!(
            catalogue.vacation_type("hiking").expect("known").as_ref(),
            "hiking"
        );
    }

    #[rstest]
    #[case("lisbon")]
    #[case(" Lisbon")]
    #[case("Paris")]
    fn rejects_destinations_outside_the_set(catalogue: VacationCatalogue, #[case] value: &str) {
        assert_eq!(
            catalogue.destination(value),
            Err(CatalogueError::UnknownDestination {
                value: value.to_owned()
            })
        );
    }

    #[rstest]
    fn destination_names_are_not_vacation_types(catalogue: VacationCatalogue) {
        assert!(catalogue.vacation_type("Lisbon").is_err());
    }

    #[rstest]
    fn empty_sets_are_rejected() {
        let err = VacationCatalogue::new(Vec::<String>::new(), ["beach"]).expect_err("empty");
        assert_eq!(
            err,
            CatalogueError::EmptySet {
                set: "destinations"
            }
        );
    }

    #[rstest]
    fn listing_is_sorted(catalogue: VacationCatalogue) {
        let destinations: Vec<_> = catalogue.destinations().collect();
        assert_eq!(destinations, vec!["Kyoto", "Lisbon", "Reykjavik"]);
    }
}
