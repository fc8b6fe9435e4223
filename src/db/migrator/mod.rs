use sea_orm_migration::prelude::*;

mod m20250720_initial;
mod m20250721_add_content_indexes;
mod m20250722_seed_admin;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250720_initial::Migration),
            Box::new(m20250721_add_content_indexes::Migration),
            Box::new(m20250722_seed_admin::Migration),
        ]
    }
}
