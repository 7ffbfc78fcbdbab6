//! Vacation preferences submitted by group members.
//!
//! Each member owns at most one [`VacationPreference`]: a travel window plus a
//! destination and vacation type drawn from the configured catalogue.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::{Destination, UserId, Username, VacationType};

/// Longest accepted travel window, in days.
pub const MAX_SPAN_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Errors raised while building a [`TravelWindow`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TravelWindowError {
    /// The window spans more than [`MAX_SPAN_DAYS`] days.
    #[error("the travel window spans {days} days; at most {max} are allowed")]
    SpanTooLong {
        /// Span of the rejected window, rounded up to whole days.
        days: i64,
        /// Configured maximum.
        max: i64,
    },
}

/// Number of days between two instants, regardless of order, with partial
/// days rounded up.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use vacation_planner::domain::span_in_days;
///
/// let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 6, 8, 1, 0, 0).unwrap();
/// assert_eq!(span_in_days(start, end), 8);
/// assert_eq!(span_in_days(end, start), 8);
/// ```
pub fn span_in_days(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    let millis = (b - a).num_milliseconds().abs();
    let whole = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY == 0 {
        whole
    } else {
        whole + 1
    }
}

/// Requested travel dates.
///
/// The two dates are kept exactly as submitted; an end date before the start
/// date is accepted as long as the span rule holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TravelWindow {
    starting_date: NaiveDate,
    end_date: NaiveDate,
}

impl TravelWindow {
    /// Validate a window given as instants; the stored dates are their UTC
    /// calendar days.
    pub fn from_instants(
        starting: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, TravelWindowError> {
        let days = span_in_days(starting, end);
        if days > MAX_SPAN_DAYS {
            return Err(TravelWindowError::SpanTooLong {
                days,
                max: MAX_SPAN_DAYS,
            });
        }
        Ok(Self {
            starting_date: starting.date_naive(),
            end_date: end.date_naive(),
        })
    }

    /// Validate a window given as calendar dates.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use vacation_planner::domain::TravelWindow;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// assert!(TravelWindow::from_dates(start, NaiveDate::from_ymd_opt(2024, 6, 8).unwrap()).is_ok());
    /// assert!(TravelWindow::from_dates(start, NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()).is_err());
    /// ```
    pub fn from_dates(starting: NaiveDate, end: NaiveDate) -> Result<Self, TravelWindowError> {
        Self::from_instants(midnight_utc(starting), midnight_utc(end))
    }

    /// Rebuild a window read back from the store without re-validating it.
    pub fn from_stored(starting_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            starting_date,
            end_date,
        }
    }

    /// First requested day.
    pub fn starting_date(&self) -> NaiveDate {
        self.starting_date
    }

    /// Last requested day.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// A member's submitted preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacationPreference {
    /// Owning member.
    pub user_id: UserId,
    /// Requested travel dates.
    pub window: TravelWindow,
    /// Preferred destination.
    pub destination: Destination,
    /// Preferred kind of vacation.
    pub vacation_type: VacationType,
}

/// A stored preference joined with its owner's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceWithOwner {
    /// Store-assigned row identifier; ascending in submission order.
    pub id: i64,
    /// The stored preference.
    pub preference: VacationPreference,
    /// Owner display name.
    pub username: Username,
}
