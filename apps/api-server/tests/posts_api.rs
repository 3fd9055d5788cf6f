// tests/posts_api.rs

use actix_web::{App, http::StatusCode, test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use api_server::handlers::configure_routes;
use api_server::observability::RequestIdMiddleware;
use api_server::state::AppState;

/// Mount the full route table over a fresh in-memory store.
macro_rules! spawn_app {
    () => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await
    };
}

/// Create a post through the API and return its JSON body.
macro_rules! create_post {
    ($app:expr, $author:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri(&format!("/forum/post/{}", $author))
            .set_json($body)
            .to_request();
        let res = test::call_service(&$app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        body
    }};
}

#[actix_web::test]
async fn health_reports_in_memory_store() {
    let app = spawn_app!();

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "in-memory");
}

#[actix_web::test]
async fn create_like_and_comment_flow() {
    // Arrange
    let app = spawn_app!();
    let post = create_post!(
        app,
        "alice",
        json!({ "title": "Hello", "content": "First post", "tags": ["intro", "rust"] })
    );
    let id = post["id"].as_str().unwrap().to_string();
    assert_eq!(post["author"], "alice");
    assert_eq!(post["likes"], 0);
    assert_eq!(post["comments"], json!([]));
    assert_eq!(post["tags"], json!(["intro", "rust"]));
    assert!(post["dateCreated"].is_string());

    // Act: like
    let req = test::TestRequest::put()
        .uri(&format!("/forum/post/{}/like", id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["result"], "Like added +1");

    // Act: comment
    let req = test::TestRequest::put()
        .uri(&format!("/forum/post/{}/comment/bob", id))
        .set_json(json!({ "message": "Welcome!" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;

    // Assert
    assert_eq!(body["likes"], 1);
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["user"], "bob");
    assert_eq!(comments[0]["message"], "Welcome!");
    assert_eq!(comments[0]["likes"], 0);
}

#[actix_web::test]
async fn unknown_or_malformed_ids_are_not_found() {
    let app = spawn_app!();

    for uri in [
        format!("/forum/post/{}", uuid::Uuid::new_v4()),
        "/forum/post/not-a-uuid".to_string(),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], 404);
    }

    let req = test::TestRequest::put()
        .uri(&format!("/forum/post/{}/like", uuid::Uuid::new_v4()))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_overwrites_supplied_fields_only() {
    let app = spawn_app!();
    let post = create_post!(
        app,
        "alice",
        json!({ "title": "Draft", "content": "Body", "tags": ["a"] })
    );
    let id = post["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/forum/post/{}", id))
        .set_json(json!({ "title": "Final" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;

    assert_eq!(body["title"], "Final");
    assert_eq!(body["content"], "Body");
    assert_eq!(body["tags"], json!(["a"]));
}

#[actix_web::test]
async fn empty_update_is_rejected() {
    let app = spawn_app!();
    let post = create_post!(app, "alice", json!({ "title": "T", "content": "C" }));
    let id = post["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/forum/post/{}", id))
        .set_json(json!({}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["type"], "/problems/validation");
}

#[actix_web::test]
async fn malformed_body_is_a_problem_response() {
    let app = spawn_app!();

    let req = test::TestRequest::post()
        .uri("/forum/post/alice")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["instance"], "/forum/post/alice");
}

#[actix_web::test]
async fn blank_title_is_rejected() {
    let app = spawn_app!();

    let req = test::TestRequest::post()
        .uri("/forum/post/alice")
        .set_json(json!({ "title": "  ", "content": "C" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn delete_returns_post_then_forgets_it() {
    let app = spawn_app!();
    let post = create_post!(app, "alice", json!({ "title": "T", "content": "C" }));
    let id = post["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/forum/post/{}", id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], id.as_str());

    let req = test::TestRequest::get()
        .uri(&format!("/forum/post/{}", id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn queries_by_author_and_tags() {
    let app = spawn_app!();
    create_post!(
        app,
        "alice",
        json!({ "title": "A1", "content": "C", "tags": ["rust"] })
    );
    create_post!(
        app,
        "bob",
        json!({ "title": "B1", "content": "C", "tags": ["go", "web"] })
    );
    create_post!(app, "alice", json!({ "title": "A2", "content": "C" }));

    let req = test::TestRequest::get()
        .uri("/forum/posts/author/alice")
        .to_request();
    let by_author: Value = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = by_author
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["A1", "A2"]);

    let req = test::TestRequest::post()
        .uri("/forum/posts/tags")
        .set_json(json!(["web", "rust"]))
        .to_request();
    let by_tags: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(by_tags.as_array().unwrap().len(), 2);

    let req = test::TestRequest::post()
        .uri("/forum/posts/tags")
        .set_json(json!([]))
        .to_request();
    let none: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(none, json!([]));

    let req = test::TestRequest::get().uri("/forum/posts").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn period_query_uses_open_bounds() {
    let app = spawn_app!();
    create_post!(app, "alice", json!({ "title": "T", "content": "C" }));

    let req = test::TestRequest::post()
        .uri("/forum/posts/period")
        .set_json(json!({ "dateFrom": Utc::now() - Duration::hours(1) }))
        .to_request();
    let recent: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(recent.as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri("/forum/posts/period")
        .set_json(json!({
            "dateFrom": Utc::now() - Duration::days(2),
            "dateTo": Utc::now() - Duration::days(1),
        }))
        .to_request();
    let old: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(old, json!([]));
}

#[actix_web::test]
async fn period_query_accepts_date_only_bounds() {
    let app = spawn_app!();
    create_post!(app, "alice", json!({ "title": "T", "content": "C" }));

    let tomorrow = (Utc::now() + Duration::days(1)).date_naive();
    let last_week = (Utc::now() - Duration::days(7)).date_naive();

    let req = test::TestRequest::post()
        .uri("/forum/posts/period")
        .set_json(json!({
            "dateFrom": last_week.format("%Y-%m-%d").to_string(),
            "dateTo": tomorrow.format("%Y-%m-%d").to_string(),
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}
