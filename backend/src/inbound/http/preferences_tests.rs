//! Tests for preference HTTP handlers.

use super::*;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use chrono::NaiveDate;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{
    FixtureUserSignup, MockPreferenceCommand, MockPreferenceQuery, PreferenceCommand,
    PreferenceQuery,
};
use crate::domain::{
    Destination, ErrorCode, TravelWindow, UserId, Username, VacationType,
};

const USER_CODE_VALUE: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn state_with(command: MockPreferenceCommand, query: MockPreferenceQuery) -> HttpState {
    let command: Arc<dyn PreferenceCommand> = Arc::new(command);
    let query: Arc<dyn PreferenceQuery> = Arc::new(query);
    HttpState::new(command, query, Arc::new(FixtureUserSignup))
}

async fn call(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api")
                .service(create_preference)
                .service(update_preference)
                .service(list_preferences)
                .service(calculate_consensus)
                .service(list_options)
                .service(get_own_preference),
        ),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn full_submission() -> Value {
    json!({
        "userCode": USER_CODE_VALUE,
        "starting_date": "2024-06-01",
        "end_date": "2024-06-07",
        "desired_destination": "Lisbon",
        "vacation_type": "beach"
    })
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
}

fn stored(start: &str, end: &str) -> VacationPreference {
    VacationPreference {
        user_id: UserId::from_raw(1),
        window: TravelWindow::from_stored(date(start), date(end)),
        destination: Destination::from_stored("Lisbon"),
        vacation_type: VacationType::from_stored("beach"),
    }
}

#[actix_web::test]
async fn create_returns_created_with_message() {
    let mut command = MockPreferenceCommand::new();
    command
        .expect_create()
        .withf(|request| {
            request.user_code == USER_CODE_VALUE
                && request.destination == "Lisbon"
                && request.vacation_type == "beach"
                && request.starting.date_naive() == date("2024-06-01")
                && request.end.date_naive() == date("2024-06-07")
        })
        .times(1)
        .return_once(|_| Ok(()));

    let (status, body) = call(
        state_with(command, MockPreferenceQuery::new()),
        actix_test::TestRequest::post()
            .uri("/api/preferences/create")
            .set_json(full_submission()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"message": "Preferences created successfully"}));
}

#[rstest]
#[case("userCode")]
#[case("starting_date")]
#[case("end_date")]
#[case("desired_destination")]
#[case("vacation_type")]
#[actix_web::test]
async fn missing_fields_are_rejected_before_the_domain(#[case] field: &str) {
    let mut command = MockPreferenceCommand::new();
    command.expect_create().never();

    let mut payload = full_submission();
    payload
        .as_object_mut()
        .expect("object payload")
        .remove(field);

    let (status, body) = call(
        state_with(command, MockPreferenceQuery::new()),
        actix_test::TestRequest::post()
            .uri("/api/preferences/create")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["field"], json!(field));
    assert_eq!(body["details"]["code"], json!("missing_field"));
}

#[actix_web::test]
async fn unparseable_dates_are_rejected() {
    let mut command = MockPreferenceCommand::new();
    command.expect_update().never();

    let mut payload = full_submission();
    payload["end_date"] = json!("next friday");

    let (status, body) = call(
        state_with(command, MockPreferenceQuery::new()),
        actix_test::TestRequest::put()
            .uri("/api/preferences/update")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("invalid_date"));
}

#[rstest]
#[case(Error::conflict("User already has preference you can only edit it."), StatusCode::CONFLICT)]
#[case(Error::not_found("User not found"), StatusCode::NOT_FOUND)]
#[case(Error::invalid_request("Invalid destination"), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn create_surfaces_domain_failures(#[case] failure: Error, #[case] expected: StatusCode) {
    let message = failure.message().to_owned();
    let mut command = MockPreferenceCommand::new();
    command
        .expect_create()
        .return_once(move |_| Err(failure));

    let (status, body) = call(
        state_with(command, MockPreferenceQuery::new()),
        actix_test::TestRequest::post()
            .uri("/api/preferences/create")
            .set_json(full_submission()),
    )
    .await;

    assert_eq!(status, expected);
    assert_eq!(body["message"], json!(message));
}

#[actix_web::test]
async fn update_returns_ok_with_message() {
    let mut command = MockPreferenceCommand::new();
    command.expect_update().times(1).return_once(|_| Ok(()));

    let (status, body) = call(
        state_with(command, MockPreferenceQuery::new()),
        actix_test::TestRequest::put()
            .uri("/api/preferences/update")
            .set_json(full_submission()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Preferences updated successfully"}));
}

#[actix_web::test]
async fn listing_includes_owner_and_row_id() {
    let mut query = MockPreferenceQuery::new();
    query.expect_list_all().return_once(|| {
        Ok(vec![PreferenceWithOwner {
            id: 7,
            preference: stored("2024-06-01", "2024-06-07"),
            username: Username::new("ada").expect("valid username"),
        }])
    });

    let (status, body) = call(
        state_with(MockPreferenceCommand::new(), query),
        actix_test::TestRequest::get().uri("/api/preferences/all"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": 7,
            "username": "ada",
            "starting_date": "2024-06-01",
            "end_date": "2024-06-07",
            "desired_destination": "Lisbon",
            "vacation_type": "beach"
        }])
    );
}

#[actix_web::test]
async fn calculate_renders_the_plan() {
    let mut query = MockPreferenceQuery::new();
    query.expect_calculate().return_once(|| {
        Ok(ConsensusResult {
            destination: Destination::from_stored("Kyoto"),
            vacation_type: VacationType::from_stored("city"),
            start_date: date("2024-06-05"),
            end_date: date("2024-06-07"),
        })
    });

    let (status, body) = call(
        state_with(MockPreferenceCommand::new(), query),
        actix_test::TestRequest::get().uri("/api/preferences/calculate"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "destination": "Kyoto",
            "vacationType": "city",
            "startDate": "2024-06-05",
            "endDate": "2024-06-07"
        })
    );
}

#[rstest]
#[case(Error::insufficient_submissions("Not all users have submitted"), "insufficient_submissions")]
#[case(Error::no_overlap("No overlapping dates"), "no_overlap")]
#[actix_web::test]
async fn calculate_failures_are_bad_requests(#[case] failure: Error, #[case] code: &str) {
    let mut query = MockPreferenceQuery::new();
    query.expect_calculate().return_once(move || Err(failure));

    let (status, body) = call(
        state_with(MockPreferenceCommand::new(), query),
        actix_test::TestRequest::get().uri("/api/preferences/calculate"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(code));
}

#[actix_web::test]
async fn fixed_routes_take_precedence_over_user_code() {
    let mut query = MockPreferenceQuery::new();
    query.expect_fetch_for_user().never();
    query.expect_options().return_once(|| {
        Ok(VacationOptions {
            destinations: vec!["Kyoto".to_owned()],
            vacation_types: vec!["city".to_owned()],
        })
    });

    let (status, body) = call(
        state_with(MockPreferenceCommand::new(), query),
        actix_test::TestRequest::get().uri("/api/preferences/options"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"destinations": ["Kyoto"], "vacationTypes": ["city"]})
    );
}

#[actix_web::test]
async fn own_preference_is_fetched_by_code() {
    let mut query = MockPreferenceQuery::new();
    query
        .expect_fetch_for_user()
        .withf(|code| code == USER_CODE_VALUE)
        .return_once(|_| Ok(stored("2024-06-03", "2024-06-09")));

    let (status, body) = call(
        state_with(MockPreferenceCommand::new(), query),
        actix_test::TestRequest::get().uri(&format!("/api/preferences/{USER_CODE_VALUE}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["starting_date"], json!("2024-06-03"));
    assert_eq!(body["end_date"], json!("2024-06-09"));
}

#[actix_web::test]
async fn own_preference_missing_is_not_found() {
    let (status, body) = call(
        HttpState::default(),
        actix_test::TestRequest::get().uri("/api/preferences/unknown"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("not_found"));
    assert!(matches!(
        serde_json::from_value::<Error>(body).map(|e| e.code()),
        Ok(ErrorCode::NotFound)
    ));
}
