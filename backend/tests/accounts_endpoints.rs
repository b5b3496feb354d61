//! Account flows over the HTTP surface with the in-memory store.

mod support;

use actix_web::{App, http::StatusCode, test as actix_test, web};
use serde_json::{Value, json};

use backend::server::api_scope;
use support::memory_state;

#[actix_web::test]
async fn register_login_round_trip() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .service(api_scope()),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "username": "ada", "password": "pw123", "name": "Ada" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile: Value = actix_test::read_body_json(response).await;
    assert_eq!(profile.get("role").and_then(Value::as_str), Some("member"));
    assert!(profile.get("passwordDigest").is_none());

    // The same username cannot register twice.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "username": "ada", "password": "other" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": "ada", "password": "pw123" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile: Value = actix_test::read_body_json(response).await;
    assert_eq!(profile.get("username").and_then(Value::as_str), Some("ada"));

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": "ada", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn role_changes_gate_deletion() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .service(api_scope()),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "username": "ada", "password": "pw" }))
            .to_request(),
    )
    .await;
    let profile: Value = actix_test::read_body_json(response).await;
    let user_id = profile.get("id").and_then(Value::as_i64).expect("user id");

    // Promote to admin; admins cannot be deleted.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/users/{user_id}"))
            .set_json(json!({ "role": "admin" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/users/{user_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Demoted members can be removed.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/users/{user_id}"))
            .set_json(json!({ "role": "member" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/users/{user_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/users").to_request(),
    )
    .await;
    let users: Value = actix_test::read_body_json(response).await;
    assert_eq!(users.as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn updating_a_missing_user_is_not_found() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .service(api_scope()),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/users/42")
            .set_json(json!({ "name": "Ghost" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
