//! End-to-end behaviour of the session, route guard and query cache against a mock backend

use jiupluck_frontend_common::auth::{AuthFlowError, FileStorage, flows};
use jiupluck_frontend_common::hooks::{admin, events, keys, rooms, timetable, users};
use jiupluck_frontend_common::query::QueryKey;
use jiupluck_frontend_common::{AppContext, GuardDecision, Route, Session, TokenStorage};
use jiupluck_http::ApiClient;
use jiupluck_http::types::{
    EventSort, EventVote, PublicEventQuery, ReviewStatus, RoomCreate, TemplateReview, TimetableData,
    UserUpdate, VoteChoice, Weekday,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_json(tag: &str) -> serde_json::Value {
    json!({
        "access_token": format!("access-{tag}"),
        "refresh_token": format!("refresh-{tag}"),
        "token_type": "bearer"
    })
}

fn room_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Study group",
        "owner_id": "u1",
        "owner_name": "Alice",
        "school": null,
        "invite_code": "ABC123",
        "created_at": "2025-03-01T08:00:00",
        "updated_at": "2025-03-01T08:00:00"
    })
}

fn event_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "room_id": "r1",
        "created_by": "u1",
        "created_by_name": "Alice",
        "title": "Lunch",
        "public": 0,
        "proposed_times": [{ "start": "2025-03-03T12:00:00", "end": "2025-03-03T13:00:00" }],
        "created_at": "2025-03-01T08:00:00",
        "updated_at": "2025-03-01T08:00:00",
        "vote_stats": { "yes": 1, "no": 0, "maybe": 0 }
    })
}

fn user_json() -> serde_json::Value {
    json!({
        "id": "u1",
        "email": "alice@example.com",
        "name": "Alice",
        "school": null,
        "major": null,
        "email_verified": true,
        "created_at": "2025-03-01T08:00:00",
        "updated_at": "2025-03-01T08:00:00"
    })
}

struct Harness {
    server: MockServer,
    ctx: AppContext,
    storage: Arc<FileStorage>,
    _dir: TempDir,
}

async fn harness() -> Harness {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().join("auth-storage.json")));

    let base = ApiClient::new(server.uri()).unwrap();
    let ctx = AppContext::new(base, Session::restore(storage.clone()));

    Harness {
        server,
        ctx,
        storage,
        _dir: dir,
    }
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "alice@example.com", "code": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("1")))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_stores_both_tokens_and_guard_renders() {
    let h = harness().await;
    mount_login(&h.server).await;

    assert_eq!(
        h.ctx.guard().check(Route::Rooms),
        GuardDecision::Redirect(Route::Login)
    );

    flows::login(&h.ctx, "alice@example.com", "123456").await.unwrap();

    let stored = h.storage.load().unwrap().unwrap();
    assert_eq!(stored.access_token, "access-1");
    assert_eq!(stored.refresh_token, "refresh-1");
    assert_eq!(
        h.ctx.guard().check(Route::Rooms),
        GuardDecision::Render(Route::Rooms)
    );

    // A restart resumes the persisted pair without logging in again
    let resumed = Session::restore(h.storage.clone());
    assert_eq!(resumed.access_token().as_deref(), Some("access-1"));
}

#[tokio::test]
async fn rejected_login_stores_nothing() {
    let h = harness().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Invalid or expired code" })),
        )
        .mount(&h.server)
        .await;

    let err = flows::login(&h.ctx, "alice@example.com", "000000")
        .await
        .unwrap_err();

    let api_error = err.api_error().unwrap();
    assert_eq!(api_error.message(), Some("Invalid or expired code"));
    assert!(!h.ctx.session().is_authenticated());
    assert_eq!(h.storage.load().unwrap(), None);
}

#[tokio::test]
async fn logout_wipes_storage_cache_and_redirects() {
    let h = harness().await;
    mount_login(&h.server).await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&h.server)
        .await;

    flows::login(&h.ctx, "alice@example.com", "123456").await.unwrap();
    let me = users::use_current_user(&h.ctx).await;
    assert_eq!(me.data().unwrap().email, "alice@example.com");

    flows::logout(&h.ctx).unwrap();

    assert_eq!(h.storage.load().unwrap(), None);
    assert!(!h.storage.path().exists());
    assert!(h.ctx.queries().status(&keys::current_user()).is_none());
    assert_eq!(
        h.ctx.guard().check_path("/timetable"),
        Some(GuardDecision::Redirect(Route::Login))
    );
    assert_eq!(
        h.ctx.guard().check(Route::Login),
        GuardDecision::Render(Route::Login)
    );
}

#[tokio::test]
async fn creating_a_room_invalidates_rooms_but_not_events() {
    let h = harness().await;
    h.ctx
        .session()
        .set_tokens(jiupluck_frontend_common::TokenPair::new("access-1", "refresh-1"))
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([room_json("r1")])))
        .expect(2)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rooms/r1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([event_json("e1")])))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rooms"))
        .and(body_json(json!({ "name": "Study group" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(room_json("r2")))
        .expect(1)
        .mount(&h.server)
        .await;

    rooms::use_rooms(&h.ctx).await.into_result().unwrap();
    events::use_room_events(&h.ctx, "r1")
        .await
        .into_result()
        .unwrap();

    let created = rooms::create_room(
        &h.ctx,
        &RoomCreate {
            name: "Study group".into(),
            school: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.id, "r2");

    assert!(h.ctx.queries().is_stale(&keys::rooms()));
    assert!(!h.ctx.queries().is_stale(&keys::room_events("r1")));

    let refetched = rooms::use_rooms(&h.ctx).await;
    assert!(!refetched.from_cache());
    let cached = events::use_room_events(&h.ctx, "r1").await;
    assert!(cached.from_cache());
}

#[tokio::test]
async fn joining_an_event_invalidates_detail_and_attendees_only() {
    let h = harness().await;
    h.ctx
        .session()
        .set_tokens(jiupluck_frontend_common::TokenPair::new("access-1", "refresh-1"))
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/events/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_json("e1")))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events/e1/attendees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/events/e1/join"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Joined" })))
        .mount(&h.server)
        .await;

    events::use_event(&h.ctx, "e1").await.into_result().unwrap();
    events::use_event_attendees(&h.ctx, "e1")
        .await
        .into_result()
        .unwrap();
    rooms::use_rooms(&h.ctx).await.into_result().unwrap();

    events::join_event(&h.ctx, "e1").await.unwrap();

    assert!(h.ctx.queries().is_stale(&keys::event("e1")));
    assert!(h.ctx.queries().is_stale(&keys::event_attendees("e1")));
    assert!(!h.ctx.queries().is_stale(&keys::rooms()));
}

#[tokio::test]
async fn failed_mutation_keeps_cache_fresh() {
    let h = harness().await;
    Mock::given(method("GET"))
        .and(path("/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rooms/join"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Invalid invite code" })),
        )
        .mount(&h.server)
        .await;

    rooms::use_rooms(&h.ctx).await.into_result().unwrap();
    let err = rooms::join_room_by_code(&h.ctx, "NOPE").await.unwrap_err();

    assert_eq!(err.message(), Some("Invalid invite code"));
    assert!(!h.ctx.queries().is_stale(&keys::rooms()));
}

#[tokio::test]
async fn every_request_carries_the_token_once_present() {
    let h = harness().await;
    mount_login(&h.server).await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rooms/r1/invite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Invited" })))
        .mount(&h.server)
        .await;

    flows::login(&h.ctx, "alice@example.com", "123456").await.unwrap();
    users::use_current_user(&h.ctx).await.into_result().unwrap();
    rooms::use_rooms(&h.ctx).await.into_result().unwrap();
    rooms::invite_to_room(&h.ctx, "r1", "bob@example.com")
        .await
        .unwrap();

    let requests = h.server.received_requests().await.unwrap();
    let after_login: Vec<_> = requests
        .iter()
        .filter(|request| request.url.path() != "/auth/login")
        .collect();

    assert_eq!(after_login.len(), 3);
    for request in after_login {
        let value = request.headers.get("authorization").unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer access-1");
    }
}

#[tokio::test]
async fn refresh_replaces_the_pair() {
    let h = harness().await;
    mount_login(&h.server).await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refresh_token": "refresh-1" })))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("2")))
        .expect(1)
        .mount(&h.server)
        .await;

    assert!(matches!(
        flows::refresh(&h.ctx).await,
        Err(AuthFlowError::NoRefreshToken)
    ));

    flows::login(&h.ctx, "alice@example.com", "123456").await.unwrap();
    flows::refresh(&h.ctx).await.unwrap();

    assert_eq!(h.ctx.session().access_token().as_deref(), Some("access-2"));
    assert_eq!(
        h.storage.load().unwrap().unwrap().refresh_token,
        "refresh-2"
    );
}

/// Mark `keys` as freshly fetched without touching the server
fn seed(ctx: &AppContext, keys: &[QueryKey]) {
    for key in keys {
        ctx.queries().set(key.clone(), ());
        assert!(!ctx.queries().is_stale(key));
    }
}

#[tokio::test]
async fn deleting_an_event_invalidates_every_public_listing() {
    let h = harness().await;
    Mock::given(method("DELETE"))
        .and(path("/events/e1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    let unfiltered = keys::public_events(&PublicEventQuery::default());
    let filtered = keys::public_events(&PublicEventQuery {
        school: Some("KAIST".into()),
        category: Some("study".into()),
        from_date: Some("2025-03-01".into()),
        to_date: None,
        sort: Some(EventSort::Time),
    });
    seed(&h.ctx, &[unfiltered.clone(), filtered.clone(), keys::rooms()]);

    events::delete_event(&h.ctx, "e1").await.unwrap();

    assert!(h.ctx.queries().is_stale(&unfiltered));
    assert!(h.ctx.queries().is_stale(&filtered));
    assert!(!h.ctx.queries().is_stale(&keys::rooms()));
}

#[tokio::test]
async fn voting_invalidates_the_event_but_not_its_attendees() {
    let h = harness().await;
    Mock::given(method("POST"))
        .and(path("/rooms/r1/events/e1/vote"))
        .and(body_json(json!({ "time_index": 0, "vote": "yes" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "event_id": "e1",
            "user_id": "u1",
            "time_index": 0,
            "vote": "yes"
        })))
        .mount(&h.server)
        .await;

    seed(&h.ctx, &[keys::event("e1"), keys::event_attendees("e1"), keys::room_events("r1")]);

    let ballot = EventVote {
        time_index: 0,
        vote: VoteChoice::Yes,
    };
    events::vote_event(&h.ctx, "r1", "e1", &ballot).await.unwrap();

    assert!(h.ctx.queries().is_stale(&keys::event("e1")));
    assert!(!h.ctx.queries().is_stale(&keys::event_attendees("e1")));
    assert!(!h.ctx.queries().is_stale(&keys::room_events("r1")));
}

#[tokio::test]
async fn saving_the_timetable_leaves_free_slots_cached() {
    let h = harness().await;
    Mock::given(method("POST"))
        .and(path("/timetable"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "user_id": "u1",
            "data": {}
        })))
        .mount(&h.server)
        .await;

    seed(&h.ctx, &[keys::timetable(), keys::free_slots(Weekday::Monday)]);

    timetable::save_timetable(&h.ctx, &TimetableData::default())
        .await
        .unwrap();

    assert!(h.ctx.queries().is_stale(&keys::timetable()));
    assert!(!h.ctx.queries().is_stale(&keys::free_slots(Weekday::Monday)));
}

#[tokio::test]
async fn admin_user_update_invalidates_pages_and_detail_only() {
    let h = harness().await;
    Mock::given(method("PUT"))
        .and(path("/admin/users/u1"))
        .and(body_json(json!({ "is_active": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&h.server)
        .await;

    let page = keys::admin_users_page(0, 100);
    let detail = keys::admin_user("u1");
    seed(&h.ctx, &[page.clone(), detail.clone(), keys::admin_pending_templates()]);

    let update = UserUpdate {
        is_active: Some(false),
        ..UserUpdate::default()
    };
    admin::update_user(&h.ctx, "u1", &update).await.unwrap();

    assert!(h.ctx.queries().is_stale(&page));
    assert!(h.ctx.queries().is_stale(&detail));
    assert!(!h.ctx.queries().is_stale(&keys::admin_pending_templates()));
}

#[tokio::test]
async fn reviewing_a_template_invalidates_both_template_lists() {
    let h = harness().await;
    Mock::given(method("POST"))
        .and(path("/admin/templates/7/review"))
        .and(body_json(json!({ "status": "approved" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .mount(&h.server)
        .await;

    seed(
        &h.ctx,
        &[
            keys::admin_pending_templates(),
            keys::timetable_templates(),
            keys::admin_users_page(0, 100),
        ],
    );

    let review = TemplateReview {
        status: ReviewStatus::Approved,
    };
    admin::review_template(&h.ctx, 7, review).await.unwrap();

    assert!(h.ctx.queries().is_stale(&keys::admin_pending_templates()));
    assert!(h.ctx.queries().is_stale(&keys::timetable_templates()));
    assert!(!h.ctx.queries().is_stale(&keys::admin_users_page(0, 100)));
}
