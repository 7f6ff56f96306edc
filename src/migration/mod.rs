use sea_orm_migration::prelude::*;

mod m20250315_000001_create_users_table;
mod m20250315_000002_create_questions_table;
mod m20250315_000003_create_answers_table;
mod m20250315_000004_create_comments_table;
mod m20250315_000005_create_notifications_table;
mod m20250315_000006_create_reports_table;
mod m20250315_000007_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250315_000001_create_users_table::Migration),
            Box::new(m20250315_000002_create_questions_table::Migration),
            Box::new(m20250315_000003_create_answers_table::Migration),
            Box::new(m20250315_000004_create_comments_table::Migration),
            Box::new(m20250315_000005_create_notifications_table::Migration),
            Box::new(m20250315_000006_create_reports_table::Migration),
            Box::new(m20250315_000007_add_lookup_indexes::Migration),
        ]
    }
}
