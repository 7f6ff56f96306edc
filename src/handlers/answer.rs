use crate::error::{AppError, AppResult};
use crate::handlers::question::{VoteRequest, VoteResponse};
use crate::middleware::auth::parse_user_id;
use crate::middleware::AuthUser;
use crate::models::AnswerModel;
use crate::response::ApiResponse;
use crate::services::answer::AnswerService;
use crate::services::notification::NotificationService;
use crate::services::question::QuestionService;
use crate::services::vote::{VoteService, VoteTarget};
use crate::websocket::hub::NotificationHub;
use axum::{extract::Path, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAnswerRequest {
    /// Question being answered
    pub question_id: i32,
    /// Answer body
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AcceptAnswerRequest {
    /// Question whose answer is being accepted
    pub question_id: i32,
    /// The chosen answer
    pub answer_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerResponse {
    pub id: i32,
    pub question_id: i32,
    pub user_id: i32,
    pub content: String,
    pub votes: i32,
    pub created_at: String,
}

impl From<AnswerModel> for AnswerResponse {
    fn from(a: AnswerModel) -> Self {
        Self {
            id: a.id,
            question_id: a.question_id,
            user_id: a.user_id,
            content: a.content,
            votes: a.votes,
            created_at: a.created_at.to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/questions/{id}/answers",
    params(("id" = i32, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Answers for the question", body = Vec<AnswerResponse>),
    ),
    tag = "answers"
)]
pub async fn list_answers(
    Extension(db): Extension<DatabaseConnection>,
    Path(question_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = AnswerService::new(db);
    let answers = service.list_by_question(question_id).await?;
    let items: Vec<AnswerResponse> = answers.into_iter().map(AnswerResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

#[utoipa::path(
    post,
    path = "/api/answers",
    security(("session_token" = [])),
    request_body = CreateAnswerRequest,
    responses(
        (status = 200, description = "Answer created", body = AnswerResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 404, description = "Question not found", body = AppError),
    ),
    tag = "answers"
)]
pub async fn create_answer(
    Extension(db): Extension<DatabaseConnection>,
    Extension(hub): Extension<NotificationHub>,
    auth_user: AuthUser,
    Json(payload): Json<CreateAnswerRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user_id = parse_user_id(&auth_user)?;

    let service = AnswerService::new(db.clone());
    let answer = service
        .create(payload.question_id, user_id, &payload.content)
        .await?;

    // Notify the question author; delivery is best-effort.
    let question_service = QuestionService::new(db.clone());
    if let Ok(question) = question_service.get_by_id(payload.question_id).await {
        let notif = NotificationService::new(db, hub);
        let _ = notif
            .notify(
                question.user_id,
                user_id,
                "answer",
                question.id,
                &format!("New answer on your question \"{}\"", question.title),
            )
            .await;
    }

    Ok(ApiResponse::ok(AnswerResponse::from(answer)))
}

#[utoipa::path(
    post,
    path = "/api/answers/vote/{id}",
    security(("session_token" = [])),
    params(("id" = i32, Path, description = "Answer ID")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote applied", body = VoteResponse),
        (status = 400, description = "Invalid vote value", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 404, description = "Answer not found", body = AppError),
    ),
    tag = "answers"
)]
pub async fn vote_answer(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<VoteRequest>,
) -> AppResult<impl IntoResponse> {
    parse_user_id(&auth_user)?;

    let service = VoteService::new(db);
    let votes = service.vote(VoteTarget::Answer, id, payload.value).await?;

    Ok(ApiResponse::ok(VoteResponse { id, votes }))
}

#[utoipa::path(
    post,
    path = "/api/answers/accept",
    security(("session_token" = [])),
    request_body = AcceptAnswerRequest,
    responses(
        (status = 200, description = "Answer accepted", body = crate::handlers::question::QuestionResponse),
        (status = 400, description = "Answer does not belong to the question", body = AppError),
        (status = 403, description = "Only the question author may accept", body = AppError),
        (status = 404, description = "Question or answer not found", body = AppError),
    ),
    tag = "answers"
)]
pub async fn accept_answer(
    Extension(db): Extension<DatabaseConnection>,
    Extension(hub): Extension<NotificationHub>,
    auth_user: AuthUser,
    Json(payload): Json<AcceptAnswerRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_user_id(&auth_user)?;

    let question_service = QuestionService::new(db.clone());
    let question = question_service
        .accept_answer(payload.question_id, payload.answer_id, user_id)
        .await?;

    let answer_service = AnswerService::new(db.clone());
    if let Ok(answer) = answer_service.get_by_id(payload.answer_id).await {
        let notif = NotificationService::new(db, hub);
        let _ = notif
            .notify(
                answer.user_id,
                user_id,
                "accept",
                answer.id,
                &format!("Your answer on \"{}\" was accepted", question.title),
            )
            .await;
    }

    Ok(ApiResponse::ok(
        crate::handlers::question::QuestionResponse::from(question),
    ))
}
