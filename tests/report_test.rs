mod common;

use serde_json::Value;

#[tokio::test]
async fn submit_report_requires_auth() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/reports/submit"))
        .json(&serde_json::json!({ "question_id": 1, "reason": "spam" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn submit_report_on_question() {
    let app = common::spawn_app().await;
    let (_poster_id, poster_token) = common::create_test_user(&app, "poster").await;
    let (reporter_id, reporter_token) = common::create_test_user(&app, "reporter").await;
    let question_id = common::create_test_question(&app, &poster_token).await;

    let resp = app
        .client
        .post(app.url("/reports/submit"))
        .bearer_auth(&reporter_token)
        .json(&serde_json::json!({
            "question_id": question_id,
            "reason": "spam",
            "message": "Link farm disguised as a question"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["success"].as_bool().unwrap());
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["reason"], "spam");
    assert_eq!(
        body["data"]["reporter_id"].as_i64().unwrap() as i32,
        reporter_id
    );
    assert!(body["data"]["processed_by"].is_null());
    assert!(body["data"]["processed_at"].is_null());
}

#[tokio::test]
async fn submit_report_rejects_unknown_reason() {
    let app = common::spawn_app().await;
    let (_poster_id, poster_token) = common::create_test_user(&app, "poster").await;
    let question_id = common::create_test_question(&app, &poster_token).await;

    let resp = app
        .client
        .post(app.url("/reports/submit"))
        .bearer_auth(&poster_token)
        .json(&serde_json::json!({
            "question_id": question_id,
            "reason": "i_just_dislike_it"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn submit_report_on_missing_question_is_404() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::create_test_user(&app, "reporter").await;

    let resp = app
        .client
        .post(app.url("/reports/submit"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "question_id": 999999,
            "reason": "other"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn list_flags_is_admin_only() {
    let app = common::spawn_app().await;
    let (_user_id, user_token) = common::create_test_user(&app, "civilian").await;

    let resp = app
        .client
        .get(app.url("/reports/admin/flags"))
        .bearer_auth(&user_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn list_flags_as_admin() {
    let app = common::spawn_app().await;
    let (admin_id, admin_token) = common::create_test_user(&app, "admin").await;
    common::make_admin(&app.db, admin_id).await;

    let (_poster_id, poster_token) = common::create_test_user(&app, "poster").await;
    let (_reporter_id, reporter_token) = common::create_test_user(&app, "reporter").await;
    let question_id = common::create_test_question(&app, &poster_token).await;

    app.client
        .post(app.url("/reports/submit"))
        .bearer_auth(&reporter_token)
        .json(&serde_json::json!({ "question_id": question_id, "reason": "offensive" }))
        .send()
        .await
        .unwrap();

    let resp = app
        .client
        .get(app.url("/reports/admin/flags"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let flags = body["data"]["items"].as_array().unwrap();
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0]["status"], "pending");
}

#[tokio::test]
async fn list_flags_filters_by_status() {
    let app = common::spawn_app().await;
    let (admin_id, admin_token) = common::create_test_user(&app, "admin").await;
    common::make_admin(&app.db, admin_id).await;

    let (_poster_id, poster_token) = common::create_test_user(&app, "poster").await;
    let question_id = common::create_test_question(&app, &poster_token).await;

    let resp = app
        .client
        .post(app.url("/reports/submit"))
        .bearer_auth(&poster_token)
        .json(&serde_json::json!({ "question_id": question_id, "reason": "misleading" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let flag_id = body["data"]["id"].as_i64().unwrap();

    // Reject it, then filter
    let resp = app
        .client
        .patch(app.url(&format!("/reports/admin/flags/{}", flag_id)))
        .bearer_auth(&admin_token)
        .json(&serde_json::json!({ "action": "rejected" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = app
        .client
        .get(app.url("/reports/admin/flags?status=pending"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 0);

    let resp = app
        .client
        .get(app.url("/reports/admin/flags?status=rejected"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
}
