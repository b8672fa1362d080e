//! Schema migrations, applied in the order `Migrator` lists them.

pub use sea_orm_migration::prelude::*;

mod m20250929_111647;
mod m20251018_075911_add_posts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250929_111647::Migration),
            Box::new(m20251018_075911_add_posts::Migration),
        ]
    }
}
