//! Route-level tests against the in-memory store.

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;

use super::configure;
use crate::config::AuthSettings;
use crate::database::{MemoryStore, Store};

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::from(Arc::new(MemoryStore::new()) as Arc<dyn Store>))
                .app_data(web::Data::new(AuthSettings::new("test-secret", 3600, 4)))
                .configure(configure),
        )
        .await
    };
}

/// Sends a request and returns `(status, json body)`.
macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! register {
    ($app:expr, $name:expr, $email:expr) => {{
        let (status, body) = call!(
            $app,
            test::TestRequest::post().uri("/api/users/register").set_json(json!({
                "name": $name,
                "email": $email,
                "password": "secret123",
                "password2": "secret123"
            }))
        );
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);
        body
    }};
}

/// Registers and logs in; evaluates to the `Bearer ...` token.
macro_rules! sign_up {
    ($app:expr, $name:expr, $email:expr) => {{
        register!($app, $name, $email);
        let (status, body) = call!(
            $app,
            test::TestRequest::post()
                .uri("/api/users/login")
                .set_json(json!({ "email": $email, "password": "secret123" }))
        );
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }};
}

fn get(uri: &str, token: &str) -> test::TestRequest {
    test::TestRequest::get().uri(uri).insert_header(("Authorization", token.to_string()))
}

fn post(uri: &str, token: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header(("Authorization", token.to_string()))
        .set_json(body)
}

fn delete(uri: &str, token: &str) -> test::TestRequest {
    test::TestRequest::delete().uri(uri).insert_header(("Authorization", token.to_string()))
}

fn profile_body(handle: &str) -> Value {
    json!({
        "handle": handle,
        "status": "Developer",
        "skills": "rust, mongodb ,actix",
        "company": "Acme",
        "twitter": "https://twitter.com/dev"
    })
}

#[actix_rt::test]
async fn test_smoke_routes() {
    let app = test_app!();
    let (status, body) = call!(app, test::TestRequest::get().uri("/api/users/test"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Users works.");

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/posts/test"));
    assert_eq!(body["msg"], "Posts works.");

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/profile/test"));
    assert_eq!(body["msg"], "Profiles works.");

    let (status, body) = call!(app, test::TestRequest::get().uri("/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "memory");
}

#[actix_rt::test]
async fn test_register_returns_user_without_password() {
    let app = test_app!();
    let body = register!(app, "A", "a@x.com");

    assert_eq!(body["name"], "A");
    assert_eq!(body["email"], "a@x.com");
    assert!(body["_id"].as_str().is_some_and(|id| id.len() == 24));
    assert!(body["avatar"].as_str().unwrap().contains("gravatar.com/avatar/"));
    assert!(body.get("password").is_none());
}

#[actix_rt::test]
async fn test_duplicate_email_always_rejected() {
    let app = test_app!();
    register!(app, "Ana", "ana@x.com");

    let (status, body) = call!(
        app,
        test::TestRequest::post().uri("/api/users/register").set_json(json!({
            "name": "Ana Again",
            "email": "ana@x.com",
            "password": "secret123",
            "password2": "secret123"
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["email"], "Email already exists");

    // other fields invalid too: the email error is still reported
    let (status, body) = call!(
        app,
        test::TestRequest::post().uri("/api/users/register").set_json(json!({
            "email": "ana@x.com",
            "password": "1"
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["email"], "Email already exists");
    assert_eq!(body["name"], "Name field is required");
}

#[actix_rt::test]
async fn test_login_then_current_returns_identity() {
    let app = test_app!();
    let registered = register!(app, "Bo", "bo@x.com");

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "bo@x.com", "password": "secret123" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let token = body["token"].as_str().unwrap().to_string();
    assert!(token.starts_with("Bearer "));

    let (status, body) = call!(app, get("/api/users/current", &token));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], registered["_id"]);
    assert_eq!(body["name"], "Bo");
    assert_eq!(body["email"], "bo@x.com");
}

#[actix_rt::test]
async fn test_login_failures_are_field_specific() {
    let app = test_app!();
    register!(app, "Cy", "cy@x.com");

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "nobody@x.com", "password": "secret123" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["email"], "User not found");

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "cy@x.com", "password": "wrong-password" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["password"], "Password incorrect");

    let (status, body) = call!(
        app,
        test::TestRequest::post().uri("/api/users/login").set_json(json!({}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["email"], "Email field is required");
    assert_eq!(body["password"], "Password field is required");
}

#[actix_rt::test]
async fn test_private_routes_reject_missing_or_bad_tokens() {
    let app = test_app!();

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/users/current"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = call!(app, get("/api/profile", "Bearer not-a-jwt"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call!(app, post("/api/posts", "", json!({ "text": "hello there world" })));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // public reads on the same paths stay open
    let (status, body) = call!(app, test::TestRequest::get().uri("/api/posts"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[actix_rt::test]
async fn test_malformed_json_is_a_bad_request() {
    let app = test_app!();
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn test_profile_create_read_and_update() {
    let app = test_app!();
    let token = sign_up!(app, "Dee", "dee@x.com");

    let (status, body) = call!(app, get("/api/profile", &token));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["noProfile"], "There is no profile for this user");

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/profile/all"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["noProfile"], "There are no profiles");

    let (status, body) = call!(app, post("/api/profile", &token, json!({})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["handle"], "Profile handle is required");
    assert_eq!(body["status"], "Status field is required");

    let (status, created) = call!(app, post("/api/profile", &token, profile_body("dee")));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["handle"], "dee");
    assert_eq!(created["skills"], json!(["rust", "mongodb", "actix"]));
    assert_eq!(created["social"]["twitter"], "https://twitter.com/dev");
    assert_eq!(created["user"]["name"], "Dee");
    let user_id = created["user"]["_id"].as_str().unwrap().to_string();

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/profile/handle/dee"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], created["_id"]);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/profile/user/{}", user_id))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["handle"], "dee");

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/profile/handle/ghost"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["noProfile"], "There is no profile for this user");

    // update keeps the same document; blank company keeps the stored one
    let (status, updated) = call!(
        app,
        post(
            "/api/profile",
            &token,
            json!({ "handle": "dee-dev", "status": "Senior", "skills": "rust" })
        )
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["_id"], created["_id"]);
    assert_eq!(updated["handle"], "dee-dev");
    assert_eq!(updated["status"], "Senior");
    assert_eq!(updated["company"], "Acme");
    assert!(updated["social"].get("twitter").is_none());

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/profile/all"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_profile_handle_must_be_unique() {
    let app = test_app!();
    let first = sign_up!(app, "Eve", "eve@x.com");
    let second = sign_up!(app, "Fay", "fay@x.com");

    let (status, _) = call!(app, post("/api/profile", &first, profile_body("eve")));
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call!(app, post("/api/profile", &second, profile_body("eve")));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["handle"], "That handle already exists");

    // the conflicting create did not go through
    let (status, _) = call!(app, get("/api/profile", &second));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call!(app, post("/api/profile", &second, profile_body("fay")));
    assert_eq!(status, StatusCode::OK);
    let (status, body) = call!(app, post("/api/profile", &second, profile_body("eve")));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["handle"], "That handle already exists");
}

#[actix_rt::test]
async fn test_experience_add_then_delete() {
    let app = test_app!();
    let token = sign_up!(app, "Gus", "gus@x.com");

    let experience = json!({
        "title": "Engineer",
        "company": "Acme",
        "from": "2018-01-15",
        "current": true
    });

    let (status, body) = call!(app, post("/api/profile/experience", &token, experience.clone()));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["noProfile"], "There is no profile for this user");

    call!(app, post("/api/profile", &token, profile_body("gus")));

    let (status, body) = call!(app, post("/api/profile/experience", &token, json!({})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Job title field is required");

    let (_, body) = call!(app, post("/api/profile/experience", &token, experience));
    let (status, body2) = call!(
        app,
        post(
            "/api/profile/experience",
            &token,
            json!({ "title": "Lead", "company": "Beta", "from": "2020-03-01", "to": "2021-03-01" })
        )
    );
    assert_eq!(status, StatusCode::OK);
    let first_id = body["experience"][0]["_id"].as_str().unwrap().to_string();
    assert_eq!(body2["experience"].as_array().unwrap().len(), 2);
    assert_eq!(body2["experience"][0]["title"], "Lead");
    assert_eq!(body2["experience"][0]["to"], "2021-03-01");
    assert_eq!(body2["experience"][1]["_id"], first_id.as_str());

    let (status, body) = call!(
        app,
        delete(&format!("/api/profile/experience/{}", first_id), &token)
    );
    assert_eq!(status, StatusCode::OK);
    let remaining = body["experience"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining.iter().all(|e| e["_id"] != first_id.as_str()));

    let (status, body) = call!(
        app,
        delete(&format!("/api/profile/experience/{}", first_id), &token)
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["experienceNotFound"], "Experience not found");
}

#[actix_rt::test]
async fn test_education_add_then_delete() {
    let app = test_app!();
    let token = sign_up!(app, "Hal", "hal@x.com");
    call!(app, post("/api/profile", &token, profile_body("hal")));

    let (status, body) = call!(
        app,
        post(
            "/api/profile/education",
            &token,
            json!({
                "school": "State University",
                "degree": "BSc",
                "fieldofstudy": "Computer Science",
                "from": "2010-09-01",
                "to": "2014-06-30"
            })
        )
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["education"][0]["school"], "State University");
    let id = body["education"][0]["_id"].as_str().unwrap().to_string();

    let (status, body) = call!(app, delete(&format!("/api/profile/education/{}", id), &token));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["education"], json!([]));

    let (status, body) = call!(app, delete("/api/profile/education/missing", &token));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["educationNotFound"], "Education not found");
}

#[actix_rt::test]
async fn test_delete_profile_removes_account() {
    let app = test_app!();
    let token = sign_up!(app, "Ivy", "ivy@x.com");
    call!(app, post("/api/profile", &token, profile_body("ivy")));

    let (status, body) = call!(app, delete("/api/profile", &token));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = call!(app, test::TestRequest::get().uri("/api/profile/handle/ivy"));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "ivy@x.com", "password": "secret123" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["email"], "User not found");

    // the still-valid token no longer resolves to an account
    let (status, _) = call!(app, get("/api/users/current", &token));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_post_create_read_and_owner_only_delete() {
    let app = test_app!();
    let owner = sign_up!(app, "Jo", "jo@x.com");
    let other = sign_up!(app, "Kim", "kim@x.com");

    let (status, body) = call!(app, post("/api/posts", &owner, json!({ "text": "short" })));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["text"], "Post must be between 10 and 300 characters");

    let (status, first) = call!(app, post("/api/posts", &owner, json!({ "text": "My first post here" })));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["name"], "Jo");
    assert_eq!(first["likes"], json!([]));
    let post_id = first["_id"].as_str().unwrap().to_string();

    let (_, second) = call!(app, post("/api/posts", &other, json!({ "text": "Another post from Kim" })));

    let (status, list) = call!(app, test::TestRequest::get().uri("/api/posts"));
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list[0]["date"].as_i64() >= list[1]["date"].as_i64());
    assert!(list.iter().any(|p| p["_id"] == second["_id"]));

    let (status, body) = call!(app, test::TestRequest::get().uri(&format!("/api/posts/{}", post_id)));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "My first post here");

    let (status, body) = call!(app, delete(&format!("/api/posts/{}", post_id), &other));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["notAuthorized"], "User not authorized");

    let (status, _) = call!(app, test::TestRequest::get().uri(&format!("/api/posts/{}", post_id)));
    assert_eq!(status, StatusCode::OK, "non-owner delete must not remove the post");

    let (status, body) = call!(app, delete(&format!("/api/posts/{}", post_id), &owner));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = call!(app, test::TestRequest::get().uri(&format!("/api/posts/{}", post_id)));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["noPostFound"], "No post found with that ID");

    let (status, body) = call!(app, delete(&format!("/api/posts/{}", post_id), &owner));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["postNotFound"], "No post found");
}

#[actix_rt::test]
async fn test_like_once_and_unlike() {
    let app = test_app!();
    let token = sign_up!(app, "Lou", "lou@x.com");
    let (_, created) = call!(app, post("/api/posts", &token, json!({ "text": "Please like this post" })));
    let id = created["_id"].as_str().unwrap().to_string();
    let like = format!("/api/posts/like/{}", id);
    let unlike = format!("/api/posts/unlike/{}", id);

    let (status, body) = call!(app, post(&unlike, &token, json!({})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["notLiked"], "You have not yet liked this post");

    let (status, body) = call!(app, post(&like, &token, json!({})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["likes"].as_array().unwrap().len(), 1);

    let (status, body) = call!(app, post(&like, &token, json!({})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["alreadyLiked"], "User already liked this post");

    let (status, body) = call!(app, post(&unlike, &token, json!({})));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["likes"], json!([]));

    let (status, body) = call!(app, post("/api/posts/like/missing", &token, json!({})));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["postNotFound"], "No post found");
}

#[actix_rt::test]
async fn test_comment_add_and_remove() {
    let app = test_app!();
    let author = sign_up!(app, "Max", "max@x.com");
    let commenter = sign_up!(app, "Ned", "ned@x.com");
    let bystander = sign_up!(app, "Oz", "oz@x.com");

    let (_, created) = call!(app, post("/api/posts", &author, json!({ "text": "Comment on this one" })));
    let id = created["_id"].as_str().unwrap().to_string();
    let comment_uri = format!("/api/posts/comment/{}", id);

    let (status, body) = call!(app, post(&comment_uri, &commenter, json!({ "text": "tiny" })));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["text"], "Post must be between 10 and 300 characters");

    let (status, body) = call!(app, post(&comment_uri, &commenter, json!({ "text": "Nice post, thanks!" })));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"][0]["name"], "Ned");
    let comment_id = body["comments"][0]["_id"].as_str().unwrap().to_string();
    let remove_uri = format!("/api/posts/comment/{}/{}", id, comment_id);

    let (status, body) = call!(app, delete(&remove_uri, &bystander));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["notAuthorized"], "User not authorized");

    let (status, body) = call!(app, delete(&remove_uri, &commenter));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"], json!([]));

    let (status, body) = call!(app, delete(&remove_uri, &commenter));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["commentNotExists"], "Comment does not exist");
}

#[actix_rt::test]
async fn test_post_owner_removes_anothers_comment() {
    let app = test_app!();
    let owner = sign_up!(app, "Pia", "pia@x.com");
    let commenter = sign_up!(app, "Quin", "quin@x.com");

    let (_, created) = call!(app, post("/api/posts", &owner, json!({ "text": "Owner moderates here" })));
    let id = created["_id"].as_str().unwrap().to_string();

    let (_, body) = call!(
        app,
        post(&format!("/api/posts/comment/{}", id), &commenter, json!({ "text": "A comment from Quin" }))
    );
    let comment_id = body["comments"][0]["_id"].as_str().unwrap().to_string();

    let (status, body) = call!(
        app,
        delete(&format!("/api/posts/comment/{}/{}", id, comment_id), &owner)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"], json!([]));

    let (_, body) = call!(app, test::TestRequest::get().uri(&format!("/api/posts/{}", id)));
    assert_eq!(body["comments"], json!([]));
}
