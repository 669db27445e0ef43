//! Integration tests for the HTTP surface: status codes, error bodies, sessions and assets.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{
    cookie::{Cookie, Key},
    dev::ServiceResponse,
    http::{header, StatusCode},
    test,
    web::Data,
    App,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::RwLock;
use team_draft_web::api::{self, AssetRoot, DraftStore};
use tempfile::TempDir;

macro_rules! draft_app {
    ($store:expr, $root:expr) => {
        test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .app_data($store.clone())
                .app_data(Data::new(AssetRoot($root.path().to_path_buf())))
                .configure(api::configure),
        )
        .await
    };
}

fn store() -> Data<DraftStore> {
    Data::new(RwLock::new(HashMap::new()))
}

fn asset_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>draft</h1>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();
    dir
}

fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .next()
        .expect("session cookie")
        .into_owned()
}

fn stored_drafts(store: &Data<DraftStore>) -> usize {
    store.read().unwrap().len()
}

#[actix_web::test]
async fn health_reports_ok() {
    let (store, root) = (store(), asset_root());
    let app = draft_app!(store, root);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], json!(true));
}

#[actix_web::test]
async fn validation_errors_are_400_with_error_body() {
    let (store, root) = (store(), asset_root());
    let app = draft_app!(store, root);

    let req = test::TestRequest::post()
        .uri("/api/draft/teams")
        .set_json(json!({ "name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let cookie = session_cookie(&resp);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Name must not be empty"));

    let req = test::TestRequest::post()
        .uri("/api/draft/start")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        json!("At least 2 teams and 2 participants are required to start the draft.")
    );
}

#[actix_web::test]
async fn unknown_ids_are_404() {
    let (store, root) = (store(), asset_root());
    let app = draft_app!(store, root);
    let missing = uuid::Uuid::new_v4();

    let req = test::TestRequest::put()
        .uri(&format!("/api/draft/teams/{missing}"))
        .set_json(json!({ "name": "Red" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Team not found"));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/draft/participants/{missing}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Participant not found"));
}

#[actix_web::test]
async fn next_pick_before_start_is_409() {
    let (store, root) = (store(), asset_root());
    let app = draft_app!(store, root);
    let req = test::TestRequest::post().uri("/api/draft/next-pick").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("The draft has not started"));
}

#[actix_web::test]
async fn full_draft_through_one_session() {
    let (store, root) = (store(), asset_root());
    let app = draft_app!(store, root);

    let req = test::TestRequest::post()
        .uri("/api/draft/teams")
        .set_json(json!({ "name": "Red" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);

    for (uri, name) in [
        ("/api/draft/teams", "Blue"),
        ("/api/draft/participants", "A"),
        ("/api/draft/participants", "B"),
    ] {
        let req = test::TestRequest::post()
            .uri(uri)
            .cookie(cookie.clone())
            .set_json(json!({ "name": name }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri("/api/draft/start")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"]["phase"], json!("in_progress"));
    assert_eq!(body["status"]["round"], json!(1));
    assert_eq!(body["status"]["team_on_clock"]["name"], json!("Red"));

    // roster is locked and the draft cannot start twice
    let req = test::TestRequest::post()
        .uri("/api/draft/teams")
        .cookie(cookie.clone())
        .set_json(json!({ "name": "Green" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    let req = test::TestRequest::post()
        .uri("/api/draft/start")
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let mut last = Value::Null;
    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/draft/next-pick")
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        last = test::read_body_json(resp).await;
    }
    // the third call is a no-op on a complete draft
    assert_eq!(last["status"]["phase"], json!("complete"));
    assert_eq!(last["cursor"], json!(2));
    assert_eq!(last["teams"][0]["members"].as_array().unwrap().len(), 1);
    assert_eq!(last["teams"][1]["members"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/api/draft/export.csv")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let csv = test::read_body(resp).await;
    assert_eq!(std::str::from_utf8(&csv).unwrap().lines().count(), 3);

    let req = test::TestRequest::post()
        .uri("/api/draft/restart")
        .cookie(cookie)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"]["phase"], json!("not_started"));
    assert_eq!(body["teams"], json!([]));
    assert_eq!(stored_drafts(&store), 1);
}

#[actix_web::test]
async fn sessions_each_see_their_own_draft() {
    let (store, root) = (store(), asset_root());
    let app = draft_app!(store, root);

    let req = test::TestRequest::post()
        .uri("/api/draft/teams")
        .set_json(json!({ "name": "Red" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get().uri("/api/draft").cookie(cookie).to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine["teams"][0]["name"], json!("Red"));

    let req = test::TestRequest::get().uri("/api/draft").to_request();
    let other: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(other["teams"], json!([]));
    assert_eq!(stored_drafts(&store), 1);
}

#[actix_web::test]
async fn reads_without_a_session_store_nothing() {
    let (store, root) = (store(), asset_root());
    let app = draft_app!(store, root);

    for _ in 0..3 {
        let req = test::TestRequest::get().uri("/api/draft").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.response().cookies().next().is_none());
    }
    let req = test::TestRequest::get().uri("/api/draft/export.csv").to_request();
    let csv = test::call_and_read_body(&app, req).await;
    assert_eq!(
        std::str::from_utf8(&csv).unwrap().trim_end(),
        "pick,round,team,participant,picked_at"
    );
    assert_eq!(stored_drafts(&store), 0);
}

#[actix_web::test]
async fn assets_are_served_with_table_content_types() {
    let (store, root) = (store(), asset_root());
    let app = draft_app!(store, root);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/html"), "{content_type}");
    assert_eq!(test::read_body(resp).await, "<h1>draft</h1>".as_bytes());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/app.js").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/javascript"), "{content_type}");
}

#[actix_web::test]
async fn missing_asset_is_plain_text_404() {
    let (store, root) = (store(), asset_root());
    let app = draft_app!(store, root);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/missing.js").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
    assert_eq!(test::read_body(resp).await, "File not found".as_bytes());
}

#[actix_web::test]
async fn assets_only_answer_get() {
    let (store, root) = (store(), asset_root());
    let app = draft_app!(store, root);

    let resp =
        test::call_service(&app, test::TestRequest::post().uri("/index.html").to_request()).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers().get(header::ALLOW).unwrap(), "GET");
}
