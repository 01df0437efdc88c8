//! Integration tests for the Jiu-Pluck HTTP client

use jiupluck_http::types::{
    EventVote, LoginRequest, PublicEventQuery, ReviewStatus, RoomCreate, TemplateReview,
    TimetableData, TimetableEntry, UserUpdate, VoteChoice, Weekday,
};
use jiupluck_http::{ApiClient, ClientError};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn room_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "owner_id": "u1",
        "owner_name": "Alice",
        "school": null,
        "created_at": "2025-03-01T08:00:00",
        "updated_at": "2025-03-01T08:00:00",
        "members": [{ "user_id": "u1", "name": "Alice", "role": "owner" }]
    })
}

#[tokio::test]
async fn test_client_builder() {
    let client = ApiClient::builder()
        .base_url("http://localhost:8000/api/")
        .access_token("test-token")
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000/api");
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = ApiClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_bearer_header_attached_when_token_held() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rooms"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([room_json("r1", "Lab")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::builder()
        .base_url(mock_server.uri())
        .access_token("access-1")
        .build()
        .unwrap();

    let rooms = client.list_rooms().await.unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].members[0].role, "owner");
}

#[tokio::test]
async fn test_no_header_without_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "a@example.com", "code": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "acc",
            "refresh_token": "ref",
            "token_type": "bearer"
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let tokens = client
        .login(&LoginRequest {
            email: "a@example.com".into(),
            code: "123456".into(),
        })
        .await
        .unwrap();

    assert_eq!(tokens.access_token, "acc");
    assert_eq!(tokens.refresh_token, "ref");

    let received: Vec<Request> = mock_server.received_requests().await.unwrap();
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_with_access_token_swaps_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "email": "a@example.com",
            "name": "Alice",
            "school": "NTU",
            "major": null,
            "email_verified": true,
            "is_admin": false,
            "is_active": true,
            "created_at": "2025-03-01T08:00:00",
            "updated_at": "2025-03-01T08:00:00"
        })))
        .mount(&mock_server)
        .await;

    let first = ApiClient::builder()
        .base_url(mock_server.uri())
        .access_token("first")
        .build()
        .unwrap();
    let second = first.with_access_token(Some("second".into()));

    let user = second.current_user().await.unwrap();
    assert_eq!(user.school.as_deref(), Some("NTU"));
    assert!(first.with_access_token(None).current_user().await.is_err());
}

#[tokio::test]
async fn test_refresh_sends_refresh_token_in_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refresh_token": "ref-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "acc-2",
            "refresh_token": "ref-2"
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let tokens = client.refresh("ref-1").await.unwrap();
    assert_eq!(tokens.access_token, "acc-2");
    assert_eq!(tokens.token_type, "bearer");
}

#[tokio::test]
async fn test_create_room_omits_unset_school() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rooms"))
        .and(body_json(json!({ "name": "Lab" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(room_json("r9", "Lab")))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let room = client
        .create_room(&RoomCreate {
            name: "Lab".into(),
            school: None,
        })
        .await
        .unwrap();
    assert_eq!(room.id, "r9");
}

#[tokio::test]
async fn test_room_free_slots_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rooms/r1/members/free-slots"))
        .and(query_param("weekday", "wednesday"))
        .and(query_param("template_id", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weekday": "wednesday",
            "common_slots": [{ "start": "13:00", "end": "15:00" }]
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let slots = client
        .room_free_slots("r1", Weekday::Wednesday, Some(4))
        .await
        .unwrap();
    assert_eq!(slots.weekday, Weekday::Wednesday);
    assert_eq!(slots.common_slots[0].start, "13:00");
    assert!(slots.members.is_empty());
}

#[tokio::test]
async fn test_vote_event_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rooms/r1/events/e1/vote"))
        .and(body_json(json!({ "time_index": 2, "vote": "maybe" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "event_id": "e1",
            "user_id": "u1",
            "time_index": 2,
            "vote": "maybe"
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let response = client
        .vote_event(
            "r1",
            "e1",
            &EventVote {
                time_index: 2,
                vote: VoteChoice::Maybe,
            },
        )
        .await
        .unwrap();
    assert_eq!(response.vote, VoteChoice::Maybe);
}

#[tokio::test]
async fn test_public_events_sends_only_set_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events/public"))
        .and(query_param("category", "sports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let events = client
        .public_events(&PublicEventQuery {
            category: Some("sports".into()),
            ..PublicEventQuery::default()
        })
        .await
        .unwrap();
    assert!(events.is_empty());

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), Some("category=sports"));
}

#[tokio::test]
async fn test_save_timetable_wraps_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/timetable"))
        .and(body_json(json!({
            "data": { "monday": [{ "period": "1", "course": "Physics" }] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "user_id": "u1",
            "data": { "monday": [{ "period": "1", "course": "Physics" }] }
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let data = TimetableData {
        monday: Some(vec![TimetableEntry {
            period: "1".into(),
            course: "Physics".into(),
        }]),
        ..TimetableData::default()
    };

    let saved = client.save_timetable(&data).await.unwrap();
    assert_eq!(saved.data, data);
}

#[tokio::test]
async fn test_admin_update_and_review() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/admin/users/u2"))
        .and(body_json(json!({ "is_admin": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u2",
            "email": "b@example.com",
            "name": null,
            "school": null,
            "major": null,
            "email_verified": true,
            "is_admin": true,
            "is_active": true,
            "created_at": "2025-03-01T08:00:00",
            "updated_at": "2025-03-02T08:00:00"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin/templates/7/review"))
        .and(body_json(json!({ "status": "rejected" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let user = client
        .update_user(
            "u2",
            &UserUpdate {
                is_admin: Some(true),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap();
    assert!(user.is_admin);

    client
        .review_template(
            7,
            TemplateReview {
                status: ReviewStatus::Rejected,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_room_ignores_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rooms/r1"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = ApiClient::builder()
        .base_url(mock_server.uri())
        .access_token("tok")
        .build()
        .unwrap();
    assert!(client.delete_room("r1").await.is_ok());
}

#[tokio::test]
async fn test_error_handling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rooms/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Room not found" })),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/timetable"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Could not validate credentials" })),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();

    let err = client.get_room("missing").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert_eq!(err.message(), Some("Room not found"));

    let err = client.timetable().await.unwrap_err();
    assert!(err.is_auth_failure());
    assert_eq!(err.message(), Some("Could not validate credentials"));
}

#[tokio::test]
async fn test_failures_are_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rooms/join"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).unwrap();
    let err = client.join_room_by_code("ABC123").await.unwrap_err();
    assert!(matches!(err, ClientError::ServerError { status: 500, .. }));
}
