mod common;

use serde_json::Value;

#[tokio::test]
async fn admin_routes_reject_regular_users() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::create_test_user(&app, "civilian").await;

    for path in ["/admin/stats", "/admin/users"] {
        let resp = app
            .client
            .get(app.url(path))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 403, "{} should be admin only", path);
    }
}

#[tokio::test]
async fn stats_count_entities() {
    let app = common::spawn_app().await;
    let (admin_id, admin_token) = common::create_test_user(&app, "admin").await;
    common::make_admin(&app.db, admin_id).await;

    let (_poster_id, poster_token) = common::create_test_user(&app, "poster").await;
    let question_id = common::create_test_question(&app, &poster_token).await;
    common::create_test_answer(&app, &poster_token, question_id).await;

    let resp = app
        .client
        .get(app.url("/admin/stats"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["total_users"].as_u64().unwrap() >= 2);
    assert!(body["data"]["total_questions"].as_u64().unwrap() >= 1);
    assert!(body["data"]["total_answers"].as_u64().unwrap() >= 1);
    assert_eq!(body["data"]["pending_flags"].as_u64().unwrap(), 0);
}

#[tokio::test]
async fn admin_lists_users() {
    let app = common::spawn_app().await;
    let (admin_id, admin_token) = common::create_test_user(&app, "admin").await;
    common::make_admin(&app.db, admin_id).await;
    common::create_test_user(&app, "somebody").await;

    let resp = app
        .client
        .get(app.url("/admin/users"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let users = body["data"]["items"].as_array().unwrap();
    assert!(users.len() >= 2);
    // Password hashes never leave the server
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[tokio::test]
async fn banned_user_is_locked_out() {
    let app = common::spawn_app().await;
    let (admin_id, admin_token) = common::create_test_user(&app, "admin").await;
    common::make_admin(&app.db, admin_id).await;
    let (user_id, user_token) = common::create_test_user(&app, "troll").await;

    // Ban
    let resp = app
        .client
        .patch(app.url(&format!("/admin/users/{}/ban", user_id)))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["is_banned"], true);

    // Existing session no longer passes the middleware
    let resp = app
        .client
        .get(app.url("/auth/me"))
        .bearer_auth(&user_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    // Fresh login is refused too
    let resp = app
        .client
        .post(app.url("/auth/login"))
        .json(&serde_json::json!({
            "email": body["data"]["email"],
            "password": "test_password_123"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn ban_toggle_unbans_on_second_call() {
    let app = common::spawn_app().await;
    let (admin_id, admin_token) = common::create_test_user(&app, "admin").await;
    common::make_admin(&app.db, admin_id).await;
    let (user_id, user_token) = common::create_test_user(&app, "redeemed").await;

    for expected in [true, false] {
        let resp = app
            .client
            .patch(app.url(&format!("/admin/users/{}/ban", user_id)))
            .bearer_auth(&admin_token)
            .send()
            .await
            .unwrap();
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["is_banned"], expected);
    }

    // Unbanned: session works again
    let resp = app
        .client
        .get(app.url("/auth/me"))
        .bearer_auth(&user_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn admin_cannot_ban_themselves() {
    let app = common::spawn_app().await;
    let (admin_id, admin_token) = common::create_test_user(&app, "admin").await;
    common::make_admin(&app.db, admin_id).await;

    let resp = app
        .client
        .patch(app.url(&format!("/admin/users/{}/ban", admin_id)))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn ban_missing_user_is_404() {
    let app = common::spawn_app().await;
    let (admin_id, admin_token) = common::create_test_user(&app, "admin").await;
    common::make_admin(&app.db, admin_id).await;

    let resp = app
        .client
        .patch(app.url("/admin/users/999999/ban"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}
