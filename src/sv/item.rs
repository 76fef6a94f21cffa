use sea_orm::{
  Condition, DbErr,
  sea_query::{Expr, Func, LikeExpr},
};

use crate::{
  entity::item,
  model::{self, ItemPatch, NewItem},
  prelude::*,
};

const LIKE_ESCAPE: char = '!';

/// Escapes LIKE wildcards so the search term matches literally. Only ASCII is
/// folded, the same as `LOWER()` on the column side, so non-ASCII letters must
/// match in their stored case.
fn like_pattern(term: &str) -> String {
  let mut pattern = String::with_capacity(term.len() + 2);
  pattern.push('%');
  for ch in term.to_ascii_lowercase().chars() {
    if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
      pattern.push(LIKE_ESCAPE);
    }
    pattern.push(ch);
  }
  pattern.push('%');
  pattern
}

pub struct Item<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Item<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(&self, new: NewItem) -> Result<model::Item> {
    new.validate()?;

    // Microseconds are the finest precision every backend keeps.
    let now = Utc::now().naive_utc().trunc_subsecs(6);

    let item = item::ActiveModel {
      id: NotSet,
      name: Set(new.name),
      category: Set(new.category),
      description: Set(new.description),
      created_at: Set(now),
    };

    let item = item.insert(self.db).await?;
    info!(id = item.id, "Item created");
    Ok(item.into())
  }

  pub async fn by_id(&self, id: i32) -> Result<Option<model::Item>> {
    let item = item::Entity::find_by_id(id).one(self.db).await?;
    Ok(item.map(Into::into))
  }

  pub async fn get(&self, id: i32) -> Result<model::Item> {
    self.by_id(id).await?.ok_or(Error::ItemNotFound)
  }

  /// Lists items in ascending id order. A non-blank `search` keeps only items
  /// whose name or category contains it, ignoring case.
  pub async fn list(&self, search: Option<&str>) -> Result<Vec<model::Item>> {
    let mut query = item::Entity::find();

    if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
      let pattern = like_pattern(term);
      let contains = |column: item::Column| {
        Expr::expr(Func::lower(Expr::col(column)))
          .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE))
      };

      query = query.filter(
        Condition::any()
          .add(contains(item::Column::Name))
          .add(contains(item::Column::Category)),
      );
    }

    let items = query.order_by_asc(item::Column::Id).all(self.db).await?;
    Ok(items.into_iter().map(Into::into).collect())
  }

  pub async fn update(&self, id: i32, patch: ItemPatch) -> Result<model::Item> {
    patch.validate()?;

    let item = item::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::ItemNotFound)?;

    if patch.is_empty() {
      return Ok(item.into());
    }

    let mut active: item::ActiveModel = item.into();
    if let Some(name) = patch.name {
      active.name = Set(name);
    }
    if let Some(category) = patch.category {
      active.category = Set(category);
    }
    if let Some(description) = patch.description {
      active.description = Set(description);
    }

    // The row may be deleted between the lookup and the write.
    let item = active.update(self.db).await.map_err(|err| match err {
      DbErr::RecordNotUpdated => Error::ItemNotFound,
      err => err.into(),
    })?;

    debug!(id = item.id, "Item updated");
    Ok(item.into())
  }

  pub async fn delete(&self, id: i32) -> Result<()> {
    let result = item::Entity::delete_by_id(id).exec(self.db).await?;
    if result.rows_affected == 0 {
      return Err(Error::ItemNotFound);
    }

    info!(id, "Item deleted");
    Ok(())
  }

  pub async fn count(&self) -> Result<u64> {
    Ok(item::Entity::find().count(self.db).await?)
  }
}
