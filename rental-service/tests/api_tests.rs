mod common;

use common::offer_body;
use common::TestApp;
use reqwest::multipart;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let body = app.register("alice", "alice@example.com", "secret1").await;

    assert_eq!(body["name"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["type"], "normal");
    assert!(body["id"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_ignores_case() {
    let app = TestApp::spawn().await;
    app.register("alice", "alice@example.com", "secret1").await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "alice2",
            "email": "ALICE@example.com",
            "password": "secret2"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_register_short_password_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "bob",
            "email": "bob@example.com",
            "password": "abc"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("alice", "alice@example.com", "secret1").await;

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "wrong12" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_email = app
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "secret1" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let first: Value = wrong_password.json().await.unwrap();
    let second: Value = unknown_email.json().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_check_returns_current_user() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "alice@example.com").await;

    let response = app
        .get("/api/auth/check")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_invalid_token_is_rejected_where_anonymous_is_allowed() {
    let app = TestApp::spawn().await;

    let anonymous = app
        .get("/api/offers")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(anonymous.status(), StatusCode::OK);

    let forged = app
        .get("/api/offers")
        .bearer_auth("not-a-token")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_offer_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/offers")
        .json(&offer_body())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_offer_without_token() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "alice@example.com").await;
    let offer_id = app.create_offer(&token).await;

    let response = app
        .patch(&format!("/api/offers/{}", offer_id))
        .json(&json!({ "price": 200 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_offer_ignores_derived_fields() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "alice@example.com").await;
    let offer_id = app.create_offer(&token).await;

    let response = app
        .patch(&format!("/api/offers/{}", offer_id))
        .bearer_auth(&token)
        .json(&json!({ "price": 200, "rating": 5, "commentsCount": 40 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["price"], 200);
    assert_eq!(body["rating"], 0.0);
    assert_eq!(body["commentsCount"], 0);
}

#[tokio::test]
async fn test_unknown_offer_id_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/offers/2f1d3a1e-9a4b-4a55-b1c4-0e4b1f3c9d10")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_body_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_comments_drive_rating_and_offer_deletion_cascades() {
    let app = TestApp::spawn().await;
    let owner = app.register_and_login("alice", "alice@example.com").await;
    let guest = app.register_and_login("bob", "bob@example.com").await;
    let offer_id = app.create_offer(&owner).await;

    for (token, rating) in [(&owner, 4), (&guest, 2)] {
        let response = app
            .post(&format!("/api/offers/{}/comments", offer_id))
            .bearer_auth(token)
            .json(&json!({ "text": "Pleasant stay overall", "rating": rating }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let offer: Value = app
        .get(&format!("/api/offers/{}", offer_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(offer["rating"], 3.0);
    assert_eq!(offer["commentsCount"], 2);
    assert_eq!(offer["author"]["email"], "alice@example.com");

    let comments: Value = app
        .get(&format!("/api/offers/{}/comments", offer_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(comments.as_array().unwrap().len(), 2);

    let forbidden = app
        .delete(&format!("/api/offers/{}", offer_id))
        .bearer_auth(&guest)
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let deleted = app
        .delete(&format!("/api/offers/{}", offer_id))
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = app
        .get(&format!("/api/offers/{}/comments", offer_id))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_comment_refreshes_rating() {
    let app = TestApp::spawn().await;
    let owner = app.register_and_login("alice", "alice@example.com").await;
    let offer_id = app.create_offer(&owner).await;

    let comment: Value = app
        .post(&format!("/api/offers/{}/comments", offer_id))
        .bearer_auth(&owner)
        .json(&json!({ "text": "Quiet and clean", "rating": 5 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let comment_id = comment["id"].as_str().unwrap();

    let response = app
        .delete(&format!("/api/offers/{}/comments/{}", offer_id, comment_id))
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let offer: Value = app
        .get(&format!("/api/offers/{}", offer_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(offer["rating"], 0.0);
    assert_eq!(offer["commentsCount"], 0);
}

#[tokio::test]
async fn test_favorites_are_idempotent_and_flagged() {
    let app = TestApp::spawn().await;
    let owner = app.register_and_login("alice", "alice@example.com").await;
    let guest = app.register_and_login("bob", "bob@example.com").await;
    let offer_id = app.create_offer(&owner).await;

    for _ in 0..2 {
        let response = app
            .post(&format!("/api/favorites/{}", offer_id))
            .bearer_auth(&guest)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let favorites: Value = app
        .get("/api/favorites")
        .bearer_auth(&guest)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let favorites = favorites.as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["isFavorite"], true);

    let listing: Value = app
        .get("/api/offers")
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing[0]["isFavorite"], false);

    for _ in 0..2 {
        let response = app
            .delete(&format!("/api/favorites/{}", offer_id))
            .bearer_auth(&guest)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let favorites: Value = app
        .get("/api/favorites")
        .bearer_auth(&guest)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(favorites.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_premium_offers_by_city() {
    let app = TestApp::spawn().await;
    let owner = app.register_and_login("alice", "alice@example.com").await;
    app.create_offer(&owner).await;

    let cologne: Value = app
        .get("/api/offers/premium/Cologne")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cologne.as_array().unwrap().len(), 1);

    let paris: Value = app
        .get("/api/offers/premium/Paris")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(paris.as_array().unwrap().is_empty());

    let unknown = app.get("/api/offers/premium/Berlin").send().await.unwrap();
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_avatar_upload_and_format_check() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "alice@example.com").await;

    let png = multipart::Part::bytes(vec![0x89, 0x50, 0x4e, 0x47])
        .file_name("me.png")
        .mime_str("image/png")
        .unwrap();
    let response = app
        .post("/api/users/avatar")
        .bearer_auth(&token)
        .multipart(multipart::Form::new().part("avatar", png))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    let avatar = body["avatar"].as_str().unwrap();
    assert!(avatar.starts_with("/upload/"));

    let file_name = avatar.trim_start_matches("/upload/");
    assert!(app.uploads.path().join(file_name).exists());

    let served = app.get(avatar).send().await.unwrap();
    assert_eq!(served.status(), StatusCode::OK);

    let gif = multipart::Part::bytes(b"GIF89a".to_vec())
        .file_name("me.gif")
        .mime_str("image/gif")
        .unwrap();
    let rejected = app
        .post("/api/users/avatar")
        .bearer_auth(&token)
        .multipart(multipart::Form::new().part("avatar", gif))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_profile_keeps_email() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "alice@example.com").await;

    let response = app
        .patch("/api/users/me")
        .bearer_auth(&token)
        .json(&json!({ "name": "alicia", "type": "pro" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "alicia");
    assert_eq!(body["type"], "pro");
    assert_eq!(body["email"], "alice@example.com");
}
