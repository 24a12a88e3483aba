mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{error_message, TestApp};

#[tokio::test]
async fn create_then_read_round_trip() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(app.alice.id);

    let created = app.post("/api/v1/modules", Some(&token), r#"{"name":"X"}"#).await?;
    assert_eq!(created.status, StatusCode::OK);
    let id = created.body["id"].as_i64().unwrap();
    assert_eq!(created.body["href"], format!("/api/v1/modules/{}/", id));
    assert_eq!(created.body["public"], true);

    let read = app.get(&format!("/api/v1/modules/{}", id), Some(&token)).await?;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body["name"], "X");
    assert_eq!(read.body["author"]["id"], app.alice.id);
    assert_eq!(read.body["author"]["href"], format!("/api/v1/users/{}/", app.alice.id));
    assert!(read.body["created"].as_str().unwrap().ends_with("+00:00"));
    assert!(read.body.get("plates").is_none());
    Ok(())
}

#[tokio::test]
async fn href_with_trailing_slash_resolves() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(app.alice.id);
    let id = app.create_module(&token, "slash").await?;

    let res = app.get(&format!("/api/v1/modules/{}/", id), Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["id"], id);
    Ok(())
}

#[tokio::test]
async fn any_authenticated_user_can_read_a_module() -> Result<()> {
    let app = TestApp::new().await?;
    let id = app.create_module(&app.token_for(app.alice.id), "shared").await?;

    let res = app
        .get(&format!("/api/v1/modules/{}", id), Some(&app.token_for(app.bob.id)))
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["author"]["id"], app.alice.id);
    Ok(())
}

#[tokio::test]
async fn create_without_name_is_invalid_content() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(app.alice.id);

    for body in ["", "{}", r#"{"name":"  "}"#, "not json", r#"{"w":4}"#] {
        let res = app.post("/api/v1/modules", Some(&token), body).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(error_message(&res), "Invalid content");
    }
    Ok(())
}

#[tokio::test]
async fn owner_edit_scenario() -> Result<()> {
    let app = TestApp::new().await?;
    let alice = app.token_for(app.alice.id);
    let bob = app.token_for(app.bob.id);
    let id = app.create_module(&alice, "M").await?;
    let path = format!("/api/v1/modules/{}", id);

    let res = app.put(&path, Some(&bob), r#"{"w":50,"h":25}"#).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.body,
        json!({ "error": { "message": "Can't edit someone else's module" } })
    );

    let res = app.put(&path, Some(&alice), r#"{"w":50,"h":25}"#).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["w"], 50);
    assert_eq!(res.body["h"], 25);
    assert_eq!(res.body["name"], "M");
    Ok(())
}

#[tokio::test]
async fn patch_behaves_like_put() -> Result<()> {
    let app = TestApp::new().await?;
    let alice = app.token_for(app.alice.id);
    let id = app.create_module(&alice, "M").await?;

    let res = app
        .send(
            Method::PATCH,
            &format!("/api/v1/modules/{}", id),
            Some(&alice),
            Some(r#"{"name":"Renamed"}"#),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Renamed");
    Ok(())
}

#[tokio::test]
async fn disallowed_fields_are_ignored() -> Result<()> {
    let app = TestApp::new().await?;
    let alice = app.token_for(app.alice.id);
    let id = app.create_module(&alice, "M").await?;
    let path = format!("/api/v1/modules/{}", id);

    let body = format!(
        r#"{{"owner_id":{0},"user_id":{0},"public":false,"id":999,"created":"2000-01-01"}}"#,
        app.bob.id
    );
    let res = app.put(&path, Some(&alice), &body).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["id"], id);
    assert_eq!(res.body["author"]["id"], app.alice.id);
    assert_eq!(res.body["public"], true);

    // ownership did not move
    let res = app.put(&path, Some(&app.token_for(app.bob.id)), r#"{"w":1}"#).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn bad_dimension_is_invalid_content() -> Result<()> {
    let app = TestApp::new().await?;
    let alice = app.token_for(app.alice.id);
    let id = app.create_module(&alice, "M").await?;

    let res = app
        .put(&format!("/api/v1/modules/{}", id), Some(&alice), r#"{"w":"wide"}"#)
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&res), "Invalid content");
    Ok(())
}

#[tokio::test]
async fn delete_checks_existence_before_ownership() -> Result<()> {
    let app = TestApp::new().await?;
    let bob = app.token_for(app.bob.id);

    for path in ["/api/v1/modules/999", "/api/v1/modules/abc"] {
        let res = app.delete(path, Some(&bob)).await?;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{}", path);
        assert_eq!(error_message(&res), "Module not found");
    }
    Ok(())
}

#[tokio::test]
async fn non_owner_cannot_delete() -> Result<()> {
    let app = TestApp::new().await?;
    let alice = app.token_for(app.alice.id);
    let id = app.create_module(&alice, "M").await?;
    let path = format!("/api/v1/modules/{}", id);

    let res = app.delete(&path, Some(&app.token_for(app.bob.id))).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&res), "Not owner");

    let res = app.get(&path, Some(&alice)).await?;
    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn delete_twice_is_not_found() -> Result<()> {
    let app = TestApp::new().await?;
    let alice = app.token_for(app.alice.id);
    let id = app.create_module(&alice, "M").await?;
    let path = format!("/api/v1/modules/{}", id);

    let res = app.delete(&path, Some(&alice)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.raw.is_empty());

    let res = app.delete(&path, Some(&alice)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&res), "Module not found");

    let res = app.get(&path, Some(&alice)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn edit_of_missing_module_is_not_found() -> Result<()> {
    let app = TestApp::new().await?;
    let res = app
        .put("/api/v1/modules/12345", Some(&app.token_for(app.alice.id)), r#"{"w":1}"#)
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn public_listing_returns_summaries() -> Result<()> {
    let app = TestApp::new().await?;
    app.create_module(&app.token_for(app.alice.id), "first").await?;
    app.create_module(&app.token_for(app.bob.id), "second").await?;

    let res = app.get("/api/v1/modules", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    let list = res.body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "first");
    assert_eq!(list[1]["author"]["name"], "Bob");
    assert!(list[0].get("public").is_none());
    assert!(list[0].get("plates").is_none());
    Ok(())
}
