mod common;

use serde_json::Value;

#[tokio::test]
async fn create_comment_requires_auth() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/comments"))
        .json(&serde_json::json!({ "answer_id": 1, "content": "drive-by" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn create_and_list_comments() {
    let app = common::spawn_app().await;
    let (_asker_id, asker_token) = common::create_test_user(&app, "asker").await;
    let (commenter_id, commenter_token) = common::create_test_user(&app, "commenter").await;
    let question_id = common::create_test_question(&app, &asker_token).await;
    let answer_id = common::create_test_answer(&app, &asker_token, question_id).await;

    let resp = app
        .client
        .post(app.url("/comments"))
        .bearer_auth(&commenter_token)
        .json(&serde_json::json!({
            "answer_id": answer_id,
            "content": "This worked for me, thanks!"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["data"]["user_id"].as_i64().unwrap() as i32,
        commenter_id
    );

    let resp = app
        .client
        .get(app.url(&format!("/answers/{}/comments", answer_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let comments = body["data"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["content"], "This worked for me, thanks!");
}

#[tokio::test]
async fn comment_on_missing_answer_is_404() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::create_test_user(&app, "shouter").await;

    let resp = app
        .client
        .post(app.url("/comments"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "answer_id": 999999,
            "content": "Commenting on nothing"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn comment_rejects_empty_content() {
    let app = common::spawn_app().await;
    let (_asker_id, asker_token) = common::create_test_user(&app, "asker").await;
    let question_id = common::create_test_question(&app, &asker_token).await;
    let answer_id = common::create_test_answer(&app, &asker_token, question_id).await;

    let resp = app
        .client
        .post(app.url("/comments"))
        .bearer_auth(&asker_token)
        .json(&serde_json::json!({ "answer_id": answer_id, "content": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn commenting_notifies_answer_author() {
    let app = common::spawn_app().await;
    let (_asker_id, asker_token) = common::create_test_user(&app, "asker").await;
    let (_helper_id, helper_token) = common::create_test_user(&app, "helper").await;
    let (_commenter_id, commenter_token) = common::create_test_user(&app, "commenter").await;
    let question_id = common::create_test_question(&app, &asker_token).await;
    let answer_id = common::create_test_answer(&app, &helper_token, question_id).await;

    app.client
        .post(app.url("/comments"))
        .bearer_auth(&commenter_token)
        .json(&serde_json::json!({
            "answer_id": answer_id,
            "content": "Could you expand on the second step?"
        }))
        .send()
        .await
        .unwrap();

    let resp = app
        .client
        .get(app.url("/notifications"))
        .bearer_auth(&helper_token)
        .send()
        .await
        .unwrap();

    let body: Value = resp.json().await.unwrap();
    let notifications = body["data"].as_array().unwrap();
    assert!(notifications.iter().any(|n| n["kind"] == "comment"));
}
