use crate::error::{AppError, AppResult};
use crate::middleware::auth::parse_user_id;
use crate::middleware::AuthUser;
use crate::models::QuestionModel;
use crate::response::{ApiResponse, PaginatedResponse};
use crate::services::question::QuestionService;
use crate::services::vote::{VoteService, VoteTarget};
use axum::{extract::Path, extract::Query, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuestionRequest {
    /// Question title (5-300 characters)
    #[validate(length(min = 5, max = 300))]
    pub title: String,
    /// Question body
    #[validate(length(min = 1))]
    pub description: String,
    /// Tag list
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuestionListQuery {
    /// Title substring filter
    pub search: Option<String>,
    /// Single tag filter
    pub tag: Option<String>,
    /// Page number
    pub page: Option<u64>,
    /// Items per page
    pub per_page: Option<u64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VoteRequest {
    /// 1 for upvote, -1 for downvote
    pub value: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VoteResponse {
    pub id: i32,
    pub votes: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionResponse {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub votes: i32,
    pub accepted_answer_id: Option<i32>,
    pub created_at: String,
}

impl From<QuestionModel> for QuestionResponse {
    fn from(q: QuestionModel) -> Self {
        let tags = q
            .tags
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: q.id,
            user_id: q.user_id,
            title: q.title,
            description: q.description,
            tags,
            votes: q.votes,
            accepted_answer_id: q.accepted_answer_id,
            created_at: q.created_at.to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/questions",
    params(
        ("search" = Option<String>, Query, description = "Title substring filter"),
        ("tag" = Option<String>, Query, description = "Single tag filter"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "List of questions", body = PaginatedResponse<QuestionResponse>),
    ),
    tag = "questions"
)]
pub async fn list_questions(
    Extension(db): Extension<DatabaseConnection>,
    Query(params): Query<QuestionListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(20).min(100);

    let service = QuestionService::new(db);
    let (questions, total) = service
        .list(params.search.as_deref(), params.tag.as_deref(), page, per_page)
        .await?;
    let items = questions.into_iter().map(QuestionResponse::from).collect();

    Ok(ApiResponse::ok(PaginatedResponse::new(
        items, total, page, per_page,
    )))
}

#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    params(("id" = i32, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Question detail", body = QuestionResponse),
        (status = 404, description = "Question not found", body = AppError),
    ),
    tag = "questions"
)]
pub async fn get_question(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = QuestionService::new(db);
    let question = service.get_by_id(id).await?;
    Ok(ApiResponse::ok(QuestionResponse::from(question)))
}

#[utoipa::path(
    post,
    path = "/api/questions",
    security(("session_token" = [])),
    request_body = CreateQuestionRequest,
    responses(
        (status = 200, description = "Question created", body = QuestionResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "questions"
)]
pub async fn create_question(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Json(payload): Json<CreateQuestionRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user_id = parse_user_id(&auth_user)?;

    let service = QuestionService::new(db);
    let question = service
        .create(
            user_id,
            &payload.title,
            &payload.description,
            payload.tags.unwrap_or_default(),
        )
        .await?;

    Ok(ApiResponse::ok(QuestionResponse::from(question)))
}

#[utoipa::path(
    post,
    path = "/api/questions/vote/{id}",
    security(("session_token" = [])),
    params(("id" = i32, Path, description = "Question ID")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote applied", body = VoteResponse),
        (status = 400, description = "Invalid vote value", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 404, description = "Question not found", body = AppError),
    ),
    tag = "questions"
)]
pub async fn vote_question(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<VoteRequest>,
) -> AppResult<impl IntoResponse> {
    parse_user_id(&auth_user)?;

    let service = VoteService::new(db);
    let votes = service.vote(VoteTarget::Question, id, payload.value).await?;

    Ok(ApiResponse::ok(VoteResponse { id, votes }))
}
