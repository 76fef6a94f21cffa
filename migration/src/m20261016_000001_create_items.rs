use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Items::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Items::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Items::Name).string_len(255).not_null())
          .col(ColumnDef::new(Items::Category).string_len(100).not_null())
          .col(ColumnDef::new(Items::Description).text().null())
          .col(ColumnDef::new(Items::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_items_category")
          .table(Items::Table)
          .col(Items::Category)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Items::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Items {
  Table,
  Id,
  Name,
  Category,
  Description,
  CreatedAt,
}
