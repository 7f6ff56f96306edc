use crate::error::{AppError, AppResult};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

pub struct VoteService {
    db: DatabaseConnection,
}

/// Which vote counter a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTarget {
    Question,
    Answer,
}

impl VoteTarget {
    fn table(self) -> &'static str {
        match self {
            VoteTarget::Question => "questions",
            VoteTarget::Answer => "answers",
        }
    }
}

impl VoteService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Apply an up (+1) or down (-1) vote as a single atomic increment at
    /// the store level. Returns the new counter value. The counter has no
    /// floor or ceiling.
    pub async fn vote(&self, target: VoteTarget, id: i32, value: i32) -> AppResult<i32> {
        if value != 1 && value != -1 {
            return Err(AppError::Validation(
                "Vote value must be 1 or -1".to_string(),
            ));
        }

        let sql = format!(
            "UPDATE {} SET votes = votes + $1 WHERE id = $2 RETURNING votes",
            target.table()
        );

        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                sea_orm::DatabaseBackend::Postgres,
                &sql,
                vec![value.into(), id.into()],
            ))
            .await?
            .ok_or(AppError::NotFound)?;

        let votes: i32 = row.try_get_by_index(0)?;
        Ok(votes)
    }
}
