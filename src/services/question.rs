use crate::{
    error::{AppError, AppResult},
    models::{question, Question, QuestionModel},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, Statement,
};

pub struct QuestionService {
    db: DatabaseConnection,
}

impl QuestionService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest-first listing with optional title substring and tag filters.
    pub async fn list(
        &self,
        search: Option<&str>,
        tag: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<QuestionModel>, u64)> {
        match tag {
            // The tags column is a jsonb array; containment needs raw SQL.
            Some(tag) => self.list_by_tag_raw(search, tag, page, per_page).await,
            None => {
                let mut query = Question::find();
                if let Some(term) = search {
                    query = query.filter(question::Column::Title.contains(term));
                }

                let paginator = query
                    .order_by_desc(question::Column::CreatedAt)
                    .paginate(&self.db, per_page);

                let total = paginator.num_items().await?;
                let questions = paginator.fetch_page(page.saturating_sub(1)).await?;
                Ok((questions, total))
            }
        }
    }

    async fn list_by_tag_raw(
        &self,
        search: Option<&str>,
        tag: &str,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<QuestionModel>, u64)> {
        let offset = page.saturating_sub(1) * per_page;
        let tag_json = serde_json::json!([tag]).to_string();

        // Build parameterized queries — all values passed via bind params
        let (count_sql, search_sql, values) = if let Some(term) = search {
            let pattern = format!("%{}%", term);
            let count = "SELECT COUNT(*) as count FROM questions \
                WHERE tags @> $1::jsonb AND title ILIKE $2";
            let select = "SELECT id, user_id, title, description, tags, votes, \
                accepted_answer_id, created_at, updated_at \
                FROM questions \
                WHERE tags @> $1::jsonb AND title ILIKE $2 \
                ORDER BY created_at DESC \
                LIMIT $3 OFFSET $4";
            let vals: Vec<sea_orm::Value> = vec![
                tag_json.into(),
                pattern.into(),
                (per_page as i64).into(),
                (offset as i64).into(),
            ];
            (count, select, vals)
        } else {
            let count = "SELECT COUNT(*) as count FROM questions \
                WHERE tags @> $1::jsonb";
            let select = "SELECT id, user_id, title, description, tags, votes, \
                accepted_answer_id, created_at, updated_at \
                FROM questions \
                WHERE tags @> $1::jsonb \
                ORDER BY created_at DESC \
                LIMIT $2 OFFSET $3";
            let vals: Vec<sea_orm::Value> = vec![
                tag_json.into(),
                (per_page as i64).into(),
                (offset as i64).into(),
            ];
            (count, select, vals)
        };

        let count_result = self
            .db
            .query_one(Statement::from_sql_and_values(
                sea_orm::DatabaseBackend::Postgres,
                count_sql,
                values[..if search.is_some() { 2 } else { 1 }].to_vec(),
            ))
            .await?
            .ok_or(AppError::Internal(anyhow::anyhow!("Count query failed")))?;

        let total: i64 = count_result.try_get_by_index(0)?;

        let questions = QuestionModel::find_by_statement(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            search_sql,
            values,
        ))
        .all(&self.db)
        .await?;

        Ok((questions, total as u64))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<QuestionModel> {
        Question::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create(
        &self,
        user_id: i32,
        title: &str,
        description: &str,
        tags: Vec<String>,
    ) -> AppResult<QuestionModel> {
        let now = chrono::Utc::now().naive_utc();

        let new_question = question::ActiveModel {
            user_id: sea_orm::ActiveValue::Set(user_id),
            title: sea_orm::ActiveValue::Set(title.to_string()),
            description: sea_orm::ActiveValue::Set(description.to_string()),
            tags: sea_orm::ActiveValue::Set(serde_json::json!(tags)),
            votes: sea_orm::ActiveValue::Set(0),
            accepted_answer_id: sea_orm::ActiveValue::Set(None),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let question = new_question.insert(&self.db).await?;
        Ok(question)
    }

    /// Mark an answer as the accepted one. Only the question's author may
    /// accept, and the answer must belong to the question.
    pub async fn accept_answer(
        &self,
        question_id: i32,
        answer_id: i32,
        caller_id: i32,
    ) -> AppResult<QuestionModel> {
        let existing = self.get_by_id(question_id).await?;
        if existing.user_id != caller_id {
            return Err(AppError::Forbidden);
        }

        let answer = crate::models::Answer::find_by_id(answer_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        if answer.question_id != question_id {
            return Err(AppError::Validation(
                "Answer does not belong to this question".to_string(),
            ));
        }

        let now = chrono::Utc::now().naive_utc();
        let mut active: question::ActiveModel = existing.into();
        active.accepted_answer_id = sea_orm::ActiveValue::Set(Some(answer_id));
        active.updated_at = sea_orm::ActiveValue::Set(now);

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }
}
