mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{error_message, TestApp};

#[tokio::test]
async fn profile_includes_owned_modules() -> Result<()> {
    let app = TestApp::new().await?;
    let alice = app.token_for(app.alice.id);
    let module = app.create_module(&alice, "mine").await?;
    app.create_module(&app.token_for(app.bob.id), "theirs").await?;

    let res = app
        .get(&format!("/api/v1/users/{}", app.alice.id), Some(&app.token_for(app.bob.id)))
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Alice");
    assert_eq!(res.body["href"], format!("/api/v1/users/{}/", app.alice.id));
    let modules = res.body["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0]["id"], module);
    assert!(res.body.get("email").is_none());
    Ok(())
}

#[tokio::test]
async fn unknown_or_malformed_user_is_not_found() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(app.alice.id);
    for path in ["/api/v1/users/999", "/api/v1/users/bob"] {
        let res = app.get(path, Some(&token)).await?;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{}", path);
        assert_eq!(error_message(&res), "User not found");
    }
    Ok(())
}

#[tokio::test]
async fn rename_self() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(app.alice.id);
    let path = format!("/api/v1/users/{}", app.alice.id);

    let res = app.put(&path, Some(&token), r#"{"name":"Alice Cooper","email":"x@y"}"#).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Alice Cooper");

    let res = app.send(Method::POST, &path, Some(&token), Some(r#"{"name":"Al"}"#)).await?;
    assert_eq!(res.status, StatusCode::OK);

    let me = app.get("/api/v1/user", Some(&token)).await?;
    assert_eq!(me.body["name"], "Al");
    Ok(())
}

#[tokio::test]
async fn cannot_rename_someone_else() -> Result<()> {
    let app = TestApp::new().await?;
    let res = app
        .put(
            &format!("/api/v1/users/{}", app.bob.id),
            Some(&app.token_for(app.alice.id)),
            r#"{"name":"Hacked"}"#,
        )
        .await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&res), "Can't edit someone else's profile");
    Ok(())
}

#[tokio::test]
async fn update_without_id_is_invalid_user_id() -> Result<()> {
    let app = TestApp::new().await?;
    let res = app
        .put("/api/v1/user", Some(&app.token_for(app.alice.id)), r#"{"name":"x"}"#)
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&res), "Invalid user id");
    Ok(())
}

#[tokio::test]
async fn rename_needs_a_name() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(app.alice.id);
    let path = format!("/api/v1/users/{}", app.alice.id);

    for body in ["{}", r#"{"name":""}"#, r#"{"email":"a@b"}"#] {
        let res = app.put(&path, Some(&token), body).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{:?}", body);
        assert_eq!(error_message(&res), "Invalid content");
    }
    Ok(())
}

#[tokio::test]
async fn user_body_has_exact_shape() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(app.alice.id);
    let expected = json!({
        "id": app.alice.id,
        "name": "Alice",
        "href": format!("/api/v1/users/{}/", app.alice.id),
        "modules": [],
        "layouts": [],
    });

    let res = app.get("/api/v1/user", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, expected);

    let res = app
        .get(&format!("/api/v1/users/{}", app.alice.id), Some(&app.token_for(app.bob.id)))
        .await?;
    assert_eq!(res.body, expected);

    let res = app
        .put(&format!("/api/v1/users/{}", app.alice.id), Some(&token), r#"{"name":"Alice"}"#)
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, expected);
    Ok(())
}
