use crate::error::{AppError, AppResult};
use crate::middleware::auth::{parse_user_id, require_admin, AuthUser};
use crate::models::ReportModel;
use crate::response::{ApiResponse, PaginatedResponse};
use crate::services::notification::NotificationService;
use crate::services::report::{ReportService, ResolveAction};
use crate::websocket::hub::NotificationHub;
use axum::{extract::Path, extract::Query, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitReportRequest {
    /// Reported question
    pub question_id: i32,
    /// Report reason (spam, offensive, misleading, other)
    #[validate(length(min = 1, max = 50))]
    pub reason: String,
    /// Optional free-text explanation
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListFlagsQuery {
    /// Filter by status
    pub status: Option<String>,
    /// Page number
    pub page: Option<u64>,
    /// Items per page
    pub per_page: Option<u64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProcessFlagRequest {
    /// Moderator decision: accepted or rejected
    #[validate(length(min = 1, max = 20))]
    pub action: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponse {
    pub id: i32,
    pub reporter_id: i32,
    pub question_id: i32,
    pub reason: String,
    pub message: Option<String>,
    pub status: String,
    pub processed_by: Option<i32>,
    pub processed_at: Option<String>,
    pub created_at: String,
}

impl From<ReportModel> for ReportResponse {
    fn from(r: ReportModel) -> Self {
        Self {
            id: r.id,
            reporter_id: r.reporter_id,
            question_id: r.question_id,
            reason: r.reason,
            message: r.message,
            status: r.status,
            processed_by: r.processed_by,
            processed_at: r.processed_at.map(|t| t.to_string()),
            created_at: r.created_at.to_string(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/reports/submit",
    security(("session_token" = [])),
    request_body = SubmitReportRequest,
    responses(
        (status = 200, description = "Report submitted", body = ReportResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 404, description = "Question not found", body = AppError),
    ),
    tag = "reports"
)]
pub async fn submit_report(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Json(payload): Json<SubmitReportRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user_id = parse_user_id(&auth_user)?;

    let service = ReportService::new(db);
    let report = service
        .submit(
            user_id,
            payload.question_id,
            &payload.reason,
            payload.message.as_deref(),
        )
        .await?;

    Ok(ApiResponse::ok(ReportResponse::from(report)))
}

#[utoipa::path(
    get,
    path = "/api/reports/admin/flags",
    security(("session_token" = [])),
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "List of flags", body = PaginatedResponse<ReportResponse>),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "reports"
)]
pub async fn list_flags(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Query(params): Query<ListFlagsQuery>,
) -> AppResult<impl IntoResponse> {
    require_admin(&db, &auth_user).await?;

    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(20).min(100);

    let service = ReportService::new(db);
    let (reports, total) = service
        .list(params.status.as_deref(), page, per_page)
        .await?;
    let items = reports.into_iter().map(ReportResponse::from).collect();

    Ok(ApiResponse::ok(PaginatedResponse::new(
        items, total, page, per_page,
    )))
}

#[utoipa::path(
    patch,
    path = "/api/reports/admin/flags/{flag_id}",
    security(("session_token" = [])),
    params(("flag_id" = i32, Path, description = "Flag ID")),
    request_body = ProcessFlagRequest,
    responses(
        (status = 200, description = "Flag processed", body = ReportResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Flag not found", body = AppError),
        (status = 409, description = "Flag already processed", body = AppError),
    ),
    tag = "reports"
)]
pub async fn process_flag(
    Extension(db): Extension<DatabaseConnection>,
    Extension(hub): Extension<NotificationHub>,
    auth_user: AuthUser,
    Path(flag_id): Path<i32>,
    Json(payload): Json<ProcessFlagRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let admin_id = require_admin(&db, &auth_user).await?;

    let action = ResolveAction::parse(&payload.action).ok_or_else(|| {
        AppError::Validation("action must be 'accepted' or 'rejected'".to_string())
    })?;

    let service = ReportService::new(db.clone());
    let outcome = service.resolve(flag_id, admin_id, action).await?;

    // An accepted flag removed the question; tell its author.
    if let Some(deleted) = outcome.deleted_question {
        let notif = NotificationService::new(db, hub);
        let _ = notif
            .notify(
                deleted.author_id,
                admin_id,
                "report",
                deleted.id,
                &format!(
                    "Your question \"{}\" was removed by moderation",
                    deleted.title
                ),
            )
            .await;
    }

    Ok(ApiResponse::ok(ReportResponse::from(outcome.report)))
}
