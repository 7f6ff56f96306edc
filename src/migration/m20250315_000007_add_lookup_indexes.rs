use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_notifications_user_created
             ON notifications (user_id, created_at DESC)",
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_notifications_user_unread
             ON notifications (user_id) WHERE is_read = FALSE",
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_questions_created
             ON questions (created_at DESC)",
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_questions_tags
             ON questions USING GIN (tags)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP INDEX IF EXISTS idx_notifications_user_created")
            .await?;
        db.execute_unprepared("DROP INDEX IF EXISTS idx_notifications_user_unread")
            .await?;
        db.execute_unprepared("DROP INDEX IF EXISTS idx_questions_created")
            .await?;
        db.execute_unprepared("DROP INDEX IF EXISTS idx_questions_tags")
            .await?;

        Ok(())
    }
}
