use crate::error::{AppError, AppResult};
use crate::middleware::auth::parse_user_id;
use crate::middleware::AuthUser;
use crate::models::CommentModel;
use crate::response::ApiResponse;
use crate::services::answer::AnswerService;
use crate::services::comment::CommentService;
use crate::services::notification::NotificationService;
use crate::websocket::hub::NotificationHub;
use axum::{extract::Path, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    /// Answer being commented on
    pub answer_id: i32,
    /// Comment body
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: i32,
    pub answer_id: i32,
    pub user_id: i32,
    pub content: String,
    pub created_at: String,
}

impl From<CommentModel> for CommentResponse {
    fn from(c: CommentModel) -> Self {
        Self {
            id: c.id,
            answer_id: c.answer_id,
            user_id: c.user_id,
            content: c.content,
            created_at: c.created_at.to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/answers/{id}/comments",
    params(("id" = i32, Path, description = "Answer ID")),
    responses(
        (status = 200, description = "Comments for the answer", body = Vec<CommentResponse>),
    ),
    tag = "comments"
)]
pub async fn list_comments(
    Extension(db): Extension<DatabaseConnection>,
    Path(answer_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = CommentService::new(db);
    let comments = service.list_by_answer(answer_id).await?;
    let items: Vec<CommentResponse> = comments.into_iter().map(CommentResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

#[utoipa::path(
    post,
    path = "/api/comments",
    security(("session_token" = [])),
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 404, description = "Answer not found", body = AppError),
    ),
    tag = "comments"
)]
pub async fn create_comment(
    Extension(db): Extension<DatabaseConnection>,
    Extension(hub): Extension<NotificationHub>,
    auth_user: AuthUser,
    Json(payload): Json<CreateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user_id = parse_user_id(&auth_user)?;

    let service = CommentService::new(db.clone());
    let comment = service
        .create(payload.answer_id, user_id, &payload.content)
        .await?;

    // Notify the answer author
    let answer_service = AnswerService::new(db.clone());
    if let Ok(answer) = answer_service.get_by_id(payload.answer_id).await {
        let notif = NotificationService::new(db, hub);
        let _ = notif
            .notify(
                answer.user_id,
                user_id,
                "comment",
                answer.id,
                "New comment on your answer",
            )
            .await;
    }

    Ok(ApiResponse::ok(CommentResponse::from(comment)))
}
