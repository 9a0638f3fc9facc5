use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Promotions::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Promotions::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Promotions::ProductName).string().not_null())
          .col(
            ColumnDef::new(Promotions::Category)
              .string()
              .not_null()
              .default("Unknown"),
          )
          .col(ColumnDef::new(Promotions::ProductId).integer().not_null())
          .col(ColumnDef::new(Promotions::Amount).integer().not_null())
          .col(ColumnDef::new(Promotions::Description).string().null())
          .col(ColumnDef::new(Promotions::FromDate).date_time().not_null())
          .col(ColumnDef::new(Promotions::ToDate).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_promotions_product_id")
          .table(Promotions::Table)
          .col(Promotions::ProductId)
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_promotions_category")
          .table(Promotions::Table)
          .col(Promotions::Category)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Promotions::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Promotions {
  Table,
  Id,
  ProductName,
  Category,
  ProductId,
  Amount,
  Description,
  FromDate,
  ToDate,
}
