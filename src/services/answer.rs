use crate::{
    error::{AppError, AppResult},
    models::{answer, Answer, AnswerModel, Question},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

pub struct AnswerService {
    db: DatabaseConnection,
}

impl AnswerService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_by_question(&self, question_id: i32) -> AppResult<Vec<AnswerModel>> {
        let answers = Answer::find()
            .filter(answer::Column::QuestionId.eq(question_id))
            .order_by_asc(answer::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(answers)
    }

    pub async fn create(
        &self,
        question_id: i32,
        user_id: i32,
        content: &str,
    ) -> AppResult<AnswerModel> {
        // The question must still exist (it may have been removed by
        // moderation since the page was loaded).
        Question::find_by_id(question_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let now = chrono::Utc::now().naive_utc();

        let new_answer = answer::ActiveModel {
            question_id: sea_orm::ActiveValue::Set(question_id),
            user_id: sea_orm::ActiveValue::Set(user_id),
            content: sea_orm::ActiveValue::Set(content.to_string()),
            votes: sea_orm::ActiveValue::Set(0),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let answer = new_answer.insert(&self.db).await?;
        Ok(answer)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<AnswerModel> {
        Answer::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}
