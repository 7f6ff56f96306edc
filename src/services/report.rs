use crate::{
    error::{AppError, AppResult},
    models::{report, Question, Report, ReportModel},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

const VALID_REASONS: &[&str] = &["spam", "offensive", "misleading", "other"];

/// Moderator decision on a pending flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAction {
    Accepted,
    Rejected,
}

impl ResolveAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    fn as_status(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

/// What resolving a report did. When the flag was accepted the target
/// question has been deleted and its author should be notified.
pub struct ResolveOutcome {
    pub report: ReportModel,
    pub deleted_question: Option<DeletedQuestion>,
}

pub struct DeletedQuestion {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
}

pub struct ReportService {
    db: DatabaseConnection,
}

impl ReportService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn submit(
        &self,
        reporter_id: i32,
        question_id: i32,
        reason: &str,
        message: Option<&str>,
    ) -> AppResult<ReportModel> {
        if !VALID_REASONS.contains(&reason) {
            return Err(AppError::Validation(format!(
                "reason must be one of: {}",
                VALID_REASONS.join(", ")
            )));
        }

        Question::find_by_id(question_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let now = chrono::Utc::now().naive_utc();
        let model = report::ActiveModel {
            reporter_id: sea_orm::ActiveValue::Set(reporter_id),
            question_id: sea_orm::ActiveValue::Set(question_id),
            reason: sea_orm::ActiveValue::Set(reason.to_string()),
            message: sea_orm::ActiveValue::Set(message.map(|s| s.to_string())),
            status: sea_orm::ActiveValue::Set("pending".to_string()),
            created_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let saved = model.insert(&self.db).await?;
        Ok(saved)
    }

    /// Admin listing, newest first, with an optional status filter.
    pub async fn list(
        &self,
        status: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<ReportModel>, u64)> {
        let mut query = Report::find();

        if let Some(s) = status {
            query = query.filter(report::Column::Status.eq(s));
        }

        let paginator = query
            .order_by_desc(report::Column::CreatedAt)
            .paginate(&self.db, per_page);

        let total = paginator.num_items().await?;
        let reports = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((reports, total))
    }

    /// Apply a moderator decision. Only pending reports can transition;
    /// anything else is a conflict. Accepting deletes the target question
    /// without cascading to its answers, comments, or sibling reports.
    pub async fn resolve(
        &self,
        report_id: i32,
        admin_id: i32,
        action: ResolveAction,
    ) -> AppResult<ResolveOutcome> {
        let existing = Report::find_by_id(report_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        if existing.status != "pending" {
            return Err(AppError::Conflict(
                "Report has already been processed".to_string(),
            ));
        }

        let deleted_question = match action {
            ResolveAction::Accepted => {
                let question = Question::find_by_id(existing.question_id)
                    .one(&self.db)
                    .await?
                    .ok_or(AppError::NotFound)?;

                Question::delete_by_id(question.id).exec(&self.db).await?;

                Some(DeletedQuestion {
                    id: question.id,
                    author_id: question.user_id,
                    title: question.title,
                })
            }
            ResolveAction::Rejected => None,
        };

        let now = chrono::Utc::now().naive_utc();
        let mut active: report::ActiveModel = existing.into();
        active.status = sea_orm::ActiveValue::Set(action.as_status().to_string());
        active.processed_by = sea_orm::ActiveValue::Set(Some(admin_id));
        active.processed_at = sea_orm::ActiveValue::Set(Some(now));

        let report = active.update(&self.db).await?;
        Ok(ResolveOutcome {
            report,
            deleted_question,
        })
    }
}
