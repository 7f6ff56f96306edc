mod common;

use serde_json::Value;

async fn get_question_votes(app: &common::TestApp, question_id: i32) -> i64 {
    let resp = app
        .client
        .get(app.url(&format!("/questions/{}", question_id)))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    body["data"]["votes"].as_i64().unwrap()
}

#[tokio::test]
async fn vote_up_then_down_returns_to_original() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::create_test_user(&app, "voter").await;
    let question_id = common::create_test_question(&app, &token).await;

    let original = get_question_votes(&app, question_id).await;

    let resp = app
        .client
        .post(app.url(&format!("/questions/vote/{}", question_id)))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "value": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["votes"].as_i64().unwrap(), original + 1);

    let resp = app
        .client
        .post(app.url(&format!("/questions/vote/{}", question_id)))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "value": -1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["votes"].as_i64().unwrap(), original);

    assert_eq!(get_question_votes(&app, question_id).await, original);
}

#[tokio::test]
async fn vote_requires_auth() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::create_test_user(&app, "author").await;
    let question_id = common::create_test_question(&app, &token).await;

    let resp = app
        .client
        .post(app.url(&format!("/questions/vote/{}", question_id)))
        .json(&serde_json::json!({ "value": 1 }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn vote_rejects_invalid_value() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::create_test_user(&app, "cheater").await;
    let question_id = common::create_test_question(&app, &token).await;

    for bad in [0, 2, -3, 100] {
        let resp = app
            .client
            .post(app.url(&format!("/questions/vote/{}", question_id)))
            .bearer_auth(&token)
            .json(&serde_json::json!({ "value": bad }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "value {} should be rejected", bad);
    }

    assert_eq!(get_question_votes(&app, question_id).await, 0);
}

#[tokio::test]
async fn vote_on_missing_question_is_404() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::create_test_user(&app, "ghosthunter").await;

    let resp = app
        .client
        .post(app.url("/questions/vote/999999"))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "value": 1 }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn answer_votes_are_independent_of_question_votes() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::create_test_user(&app, "answer_voter").await;
    let question_id = common::create_test_question(&app, &token).await;
    let answer_id = common::create_test_answer(&app, &token, question_id).await;

    let resp = app
        .client
        .post(app.url(&format!("/answers/vote/{}", answer_id)))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "value": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["votes"].as_i64().unwrap(), 1);

    // Question counter untouched
    assert_eq!(get_question_votes(&app, question_id).await, 0);
}

#[tokio::test]
async fn repeated_votes_keep_accumulating() {
    // There is no per-user vote ledger: the counter is a plain integer,
    // so the same account can stack votes.
    let app = common::spawn_app().await;
    let (_user_id, token) = common::create_test_user(&app, "stacker").await;
    let question_id = common::create_test_question(&app, &token).await;

    for _ in 0..3 {
        let resp = app
            .client
            .post(app.url(&format!("/questions/vote/{}", question_id)))
            .bearer_auth(&token)
            .json(&serde_json::json!({ "value": 1 }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    assert_eq!(get_question_votes(&app, question_id).await, 3);
}

#[tokio::test]
async fn downvotes_can_push_count_negative() {
    // No floor is enforced on the counter.
    let app = common::spawn_app().await;
    let (_user_id, token) = common::create_test_user(&app, "downer").await;
    let question_id = common::create_test_question(&app, &token).await;

    let resp = app
        .client
        .post(app.url(&format!("/questions/vote/{}", question_id)))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "value": -1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    assert_eq!(get_question_votes(&app, question_id).await, -1);
}
