//! Shared test utilities for database setup

#[cfg(test)]
pub mod test_db {
  use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema};

  use crate::entity::*;

  /// Creates an in-memory SQLite database with the promotions table
  pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let schema = Schema::new(DbBackend::Sqlite);

    let stmt = schema.create_table_from_entity(promotion::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    db
  }

  /// Same database, but with the schema built by the real migrations
  pub async fn migrated() -> DatabaseConnection {
    use migration::{Migrator, MigratorTrait};

    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
  }
}
