use crate::{
    error::{AppError, AppResult},
    models::{report, user, Answer, Question, Report, User, UserModel},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

pub struct AdminService {
    db: DatabaseConnection,
}

pub struct AdminStats {
    pub total_users: u64,
    pub total_questions: u64,
    pub total_answers: u64,
    pub pending_flags: u64,
}

impl AdminService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_stats(&self) -> AppResult<AdminStats> {
        let total_users = User::find().count(&self.db).await?;
        let total_questions = Question::find().count(&self.db).await?;
        let total_answers = Answer::find().count(&self.db).await?;
        let pending_flags = Report::find()
            .filter(report::Column::Status.eq("pending"))
            .count(&self.db)
            .await?;

        Ok(AdminStats {
            total_users,
            total_questions,
            total_answers,
            pending_flags,
        })
    }

    pub async fn list_users(&self, page: u64, per_page: u64) -> AppResult<(Vec<UserModel>, u64)> {
        let paginator = User::find()
            .order_by_desc(user::Column::CreatedAt)
            .paginate(&self.db, per_page);

        let total = paginator.num_items().await?;
        let users = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((users, total))
    }

    /// Flip a user's banned flag. Returns the updated user.
    pub async fn toggle_ban(&self, user_id: i32, admin_id: i32) -> AppResult<UserModel> {
        if user_id == admin_id {
            return Err(AppError::Validation(
                "Admins cannot ban themselves".to_string(),
            ));
        }

        let existing = User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let now = chrono::Utc::now().naive_utc();
        let mut active: user::ActiveModel = existing.clone().into();
        active.is_banned = sea_orm::ActiveValue::Set(!existing.is_banned);
        active.updated_at = sea_orm::ActiveValue::Set(now);
        let updated = active.update(&self.db).await?;
        Ok(updated)
    }
}
