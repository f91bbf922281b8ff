use std::time::Duration;

use dashboard_engine::{
    load_dashboard, ApiSettings, DashboardApi, EngineEvent, FailureKind, ProfileUpdateDto,
    ReqwestDashboardApi,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestDashboardApi {
    ReqwestDashboardApi::new(&ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("api client")
}

#[tokio::test]
async fn applications_are_fetched_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/my"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 3,
                "user_id": 1,
                "job_id": 7,
                "status": "interview_scheduled",
                "resume_score": 82,
                "voice_score": null,
                "interview_completed": false,
                "created_at": "2025-01-01T00:00:00",
                "job": { "id": 7, "title": "Data Analyst", "status": "open" }
            },
            { "id": 4, "status": "applied", "job": { "title": "QA" } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let applications = api_for(&server)
        .fetch_applications("tok-1")
        .await
        .expect("applications");

    assert_eq!(applications.len(), 2);
    assert_eq!(applications[0].id, Some(3));
    assert_eq!(applications[0].status.as_deref(), Some("interview_scheduled"));
    assert_eq!(
        applications[0].job.as_ref().and_then(|job| job.title.as_deref()),
        Some("Data Analyst")
    );
    assert_eq!(applications[0].resume_score, Some(82));
    assert_eq!(applications[0].voice_score, None);
    assert_eq!(applications[1].resume_score, None);
}

#[tokio::test]
async fn profile_is_decoded_as_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "user_id": 1,
            "full_name": "Asha Rao",
            "email": "asha@example.com",
            "phone_number": "555-0100",
            "experience_years": "4 to 8 years",
            "skills": null
        })))
        .mount(&server)
        .await;

    let profile = api_for(&server).fetch_profile("tok").await.expect("profile");

    assert_eq!(profile.full_name.as_deref(), Some("Asha Rao"));
    assert_eq!(profile.phone, None);
    assert_eq!(profile.phone_number.as_deref(), Some("555-0100"));
    assert_eq!(profile.experience_years.as_deref(), Some("4 to 8 years"));
    assert_eq!(profile.skills, None);
}

#[tokio::test]
async fn non_success_status_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/me"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Profile not found" })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).fetch_profile("tok").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.detail.as_deref(), Some("Profile not found"));
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/my"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).fetch_applications("tok").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn configured_request_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/my"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let api = ReqwestDashboardApi::new(&ApiSettings {
        base_url: server.uri(),
        request_timeout: Some(Duration::from_millis(50)),
        ..ApiSettings::default()
    })
    .expect("api client");

    let err = api.fetch_applications("tok").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn profile_failure_does_not_block_applications() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/me"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/applications/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = api_for(&server);
    match load_dashboard(&api, "tok").await {
        EngineEvent::DashboardLoaded {
            profile,
            applications,
        } => {
            assert_eq!(profile.unwrap_err().kind, FailureKind::HttpStatus(500));
            assert_eq!(applications.expect("applications"), Vec::new());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn profile_update_posts_nulls_for_missing_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/profile/"))
        .and(header("Authorization", "Bearer tok"))
        .and(body_json(json!({
            "full_name": "Meera K",
            "company_name": null,
            "experience_years": "fresher",
            "skills": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let update = ProfileUpdateDto {
        full_name: Some("Meera K".to_string()),
        experience_years: Some("fresher".to_string()),
        ..ProfileUpdateDto::default()
    };
    api_for(&server)
        .submit_profile("tok", &update)
        .await
        .expect("submit");
}

#[tokio::test]
async fn rejected_profile_update_reports_validation_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/profile/"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{ "loc": ["body", "experience_years"], "msg": "Input should be 'fresher'" }]
        })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .submit_profile("tok", &ProfileUpdateDto::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(422));
    assert_eq!(err.detail.as_deref(), Some("Input should be 'fresher'"));
}
