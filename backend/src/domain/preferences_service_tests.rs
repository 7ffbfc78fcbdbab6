//! Tests for the preference service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    FixturePreferenceRepository, FixtureUserRepository, MockPreferenceRepository,
    MockUserRepository,
};
use crate::domain::{Destination, ErrorCode, UserId, Username, VacationType};
use chrono::{NaiveDate, TimeZone, Utc};
use rstest::rstest;

const CODE: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn catalogue() -> Arc<VacationCatalogue> {
    Arc::new(
        VacationCatalogue::new(["Kyoto", "Lisbon"], ["beach", "city"]).expect("fixture catalogue"),
    )
}

fn make_service<U, P>(users: U, preferences: P) -> PreferenceService<U, P> {
    PreferenceService::new(
        Arc::new(users),
        Arc::new(preferences),
        catalogue(),
        ConsensusEngine::default(),
    )
}

fn member() -> User {
    User {
        id: UserId::from_raw(7),
        code: UserCode::parse(CODE).expect("code"),
        username: Username::new("maya").expect("name"),
    }
}

fn users_finding_member() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_code()
        .times(1)
        .return_once(|_| Ok(Some(member())));
    users
}

fn request(start_day: u32, end_day: u32) -> SubmitPreferenceRequest {
    SubmitPreferenceRequest {
        user_code: CODE.to_owned(),
        starting: Utc
            .with_ymd_and_hms(2024, 6, start_day, 0, 0, 0)
            .single()
            .expect("start"),
        end: Utc
            .with_ymd_and_hms(2024, 6, end_day, 0, 0, 0)
            .single()
            .expect("end"),
        destination: "Lisbon".to_owned(),
        vacation_type: "beach".to_owned(),
    }
}

fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).expect("valid date")
}

fn row(id: i64, start: u32, end: u32, destination: &str) -> PreferenceWithOwner {
    PreferenceWithOwner {
        id,
        preference: VacationPreference {
            user_id: UserId::from_raw(id),
            window: TravelWindow::from_stored(day(start), day(end)),
            destination: Destination::from_stored(destination),
            vacation_type: VacationType::from_stored("beach"),
        },
        username: Username::new(format!("member-{id}")).expect("name"),
    }
}

#[tokio::test]
async fn create_stores_exactly_the_submitted_values() {
    let mut preferences = MockPreferenceRepository::new();
    preferences
        .expect_insert()
        .withf(|stored| {
            stored.user_id == UserId::from_raw(7)
                && stored.window.starting_date() == day(1)
                && stored.window.end_date() == day(8)
                && stored.destination.as_ref() == "Lisbon"
                && stored.vacation_type.as_ref() == "beach"
        })
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(users_finding_member(), preferences);
    service.create(request(1, 8)).await.expect("create succeeds");
}

#[tokio::test]
async fn duplicate_create_is_a_conflict() {
    let mut preferences = MockPreferenceRepository::new();
    preferences
        .expect_insert()
        .times(1)
        .return_once(|_| Err(PreferenceRepositoryError::already_submitted(7_i64)));

    let service = make_service(users_finding_member(), preferences);
    let err = service.create(request(1, 3)).await.expect_err("conflict");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn update_without_stored_preference_is_not_found() {
    let mut preferences = MockPreferenceRepository::new();
    preferences
        .expect_update()
        .times(1)
        .return_once(|_| Err(PreferenceRepositoryError::not_submitted(7_i64)));

    let service = make_service(users_finding_member(), preferences);
    let err = service.update(request(1, 3)).await.expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(1, 9)]
#[case(9, 1)]
#[tokio::test]
async fn spans_over_a_week_are_rejected_before_any_lookup(#[case] start: u32, #[case] end: u32) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_code().never();
    let service = make_service(users, FixturePreferenceRepository);

    let err = service
        .create(request(start, end))
        .await
        .expect_err("span too long");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().and_then(|d| d.get("code")),
        Some(&serde_json::json!("span_too_long"))
    );
}

#[rstest]
#[case("Paris", "beach", "desired_destination")]
#[case("Lisbon", "ski", "vacation_type")]
#[case("Paris", "ski", "desired_destination")]
#[tokio::test]
async fn values_outside_the_catalogue_are_rejected(
    #[case] destination: &str,
    #[case] vacation_type: &str,
    #[case] field: &str,
) {
    let service = make_service(FixtureUserRepository, FixturePreferenceRepository);
    let mut submission = request(1, 3);
    submission.destination = destination.to_owned();
    submission.vacation_type = vacation_type.to_owned();

    let err = service.create(submission).await.expect_err("invalid");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().and_then(|d| d.get("field")),
        Some(&serde_json::json!(field))
    );
}

#[rstest]
#[case(CODE)]
#[case("not-a-uuid")]
#[tokio::test]
async fn unknown_members_are_not_found(#[case] code: &str) {
    let service = make_service(FixtureUserRepository, FixturePreferenceRepository);
    let mut submission = request(1, 3);
    submission.user_code = code.to_owned();

    let err = service.create(submission).await.expect_err("unknown member");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn store_failures_become_internal_errors() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_code()
        .times(1)
        .return_once(|_| Err(UserRepositoryError::connection("refused")));
    let service = make_service(users, FixturePreferenceRepository);

    let err = service.create(request(1, 3)).await.expect_err("store down");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn calculate_reports_missing_submissions() {
    let mut preferences = MockPreferenceRepository::new();
    preferences
        .expect_list_with_owner()
        .times(1)
        .return_once(|| Ok(vec![row(1, 1, 7, "Lisbon"), row(2, 1, 7, "Kyoto")]));
    let service = make_service(FixtureUserRepository, preferences);

    let err = service.calculate().await.expect_err("not ready");
    assert_eq!(err.code(), ErrorCode::InsufficientSubmissions);
    assert_eq!(
        err.details(),
        Some(&serde_json::json!({"required": 5, "submitted": 2}))
    );
}

#[tokio::test]
async fn calculate_intersects_windows_in_storage_order() {
    let rows = vec![
        row(1, 1, 10, "Kyoto"),
        row(2, 3, 8, "Lisbon"),
        row(3, 2, 9, "Kyoto"),
        row(4, 5, 7, "Lisbon"),
        row(5, 4, 11, "Oslo"),
    ];
    let mut preferences = MockPreferenceRepository::new();
    preferences
        .expect_list_with_owner()
        .times(1)
        .return_once(move || Ok(rows));
    let service = make_service(FixtureUserRepository, preferences);

    let plan = service.calculate().await.expect("plan");
    assert_eq!(plan.destination.as_ref(), "Kyoto");
    assert_eq!((plan.start_date, plan.end_date), (day(5), day(7)));
}

#[tokio::test]
async fn calculate_reports_disjoint_windows() {
    let rows = vec![
        row(1, 1, 2, "Kyoto"),
        row(2, 10, 14, "Kyoto"),
        row(3, 1, 14, "Kyoto"),
        row(4, 1, 14, "Kyoto"),
        row(5, 1, 14, "Kyoto"),
    ];
    let mut preferences = MockPreferenceRepository::new();
    preferences
        .expect_list_with_owner()
        .times(1)
        .return_once(move || Ok(rows));
    let service = make_service(FixtureUserRepository, preferences);

    let err = service.calculate().await.expect_err("no overlap");
    assert_eq!(err.code(), ErrorCode::NoOverlap);
    assert_eq!(
        err.details(),
        Some(&serde_json::json!({"startDate": "2024-06-10", "endDate": "2024-06-02"}))
    );
}

#[tokio::test]
async fn fetch_for_user_returns_the_stored_preference() {
    let stored = row(7, 2, 4, "Kyoto").preference;
    let expected = stored.clone();
    let mut preferences = MockPreferenceRepository::new();
    preferences
        .expect_find_by_user()
        .withf(|id| *id == UserId::from_raw(7))
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    let service = make_service(users_finding_member(), preferences);

    let found = service.fetch_for_user(CODE).await.expect("found");
    assert_eq!(found, expected);
}

#[tokio::test]
async fn fetch_for_user_without_submission_is_not_found() {
    let service = make_service(users_finding_member(), FixturePreferenceRepository);
    let err = service.fetch_for_user(CODE).await.expect_err("none stored");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn options_list_the_catalogue() {
    let service = make_service(FixtureUserRepository, FixturePreferenceRepository);
    let options = service.options().await.expect("options");
    assert_eq!(options.destinations, vec!["Kyoto", "Lisbon"]);
    assert_eq!(options.vacation_types, vec!["beach", "city"]);
}
