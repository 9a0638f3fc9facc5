use sea_orm::{ModelTrait, Select};

use crate::{
  entity::{Category, promotion},
  prelude::*,
  sv::{Draft, Filters, filter},
  utils,
};

pub struct Promotion<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Promotion<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  fn query() -> Select<promotion::Entity> {
    promotion::Entity::find().order_by_asc(promotion::Column::Id)
  }

  pub async fn create(&self, draft: Draft) -> Result<promotion::Model> {
    info!("Creating promotion for {}", draft.product_name);
    draft.check()?;

    Ok(draft.into_active_model().insert(self.db).await?)
  }

  pub async fn update(&self, id: i32, draft: Draft) -> Result<promotion::Model> {
    let promo = self.find_or_fail(id).await?;
    info!("Saving promotion {} for {}", id, draft.product_name);

    Ok(draft.apply(promo).update(self.db).await?)
  }

  pub async fn delete(&self, id: i32) -> Result<()> {
    let promo = self.find_or_fail(id).await?;
    info!("Deleting promotion {} for {}", id, promo.product_name);

    promo.delete(self.db).await?;
    Ok(())
  }

  /// Ends the promotion by moving its end a day before its start.
  pub async fn expire(&self, id: i32) -> Result<promotion::Model> {
    let promo = self.find_or_fail(id).await?;
    let to_date = expired_end(promo.from_date)?;
    info!("Expiring promotion {} (to_date = {})", id, to_date);

    let promo = promotion::ActiveModel { to_date: Set(to_date), ..promo.into() }
      .update(self.db)
      .await?;

    Ok(promo)
  }

  pub async fn all(&self) -> Result<Vec<promotion::Model>> {
    debug!("Processing all promotions");
    Ok(Self::query().all(self.db).await?)
  }

  pub async fn find(&self, id: i32) -> Result<Option<promotion::Model>> {
    debug!("Processing lookup for id {}", id);
    Ok(promotion::Entity::find_by_id(id).one(self.db).await?)
  }

  pub async fn find_or_fail(&self, id: i32) -> Result<promotion::Model> {
    self.find(id).await?.ok_or(Error::NotFound(id))
  }

  pub async fn find_by_product_name(
    &self,
    name: &str,
  ) -> Result<Vec<promotion::Model>> {
    debug!("Processing product query for name={}", name);
    self.find_by(promotion::Column::ProductName.eq(name)).await
  }

  pub async fn find_by_product_id(
    &self,
    product_id: i32,
  ) -> Result<Vec<promotion::Model>> {
    debug!("Processing product query for id={}", product_id);
    self.find_by(promotion::Column::ProductId.eq(product_id)).await
  }

  pub async fn find_by_category(
    &self,
    category: Category,
  ) -> Result<Vec<promotion::Model>> {
    debug!("Processing category query for {}", category.name());
    self.find_by(promotion::Column::Category.eq(category)).await
  }

  pub async fn find_by_from_date(
    &self,
    from_date: DateTime,
  ) -> Result<Vec<promotion::Model>> {
    debug!("Processing start date query for {}", from_date);
    self.find_by(promotion::Column::FromDate.eq(from_date)).await
  }

  pub async fn find_by_to_date(
    &self,
    to_date: DateTime,
  ) -> Result<Vec<promotion::Model>> {
    debug!("Processing end date query for {}", to_date);
    self.find_by(promotion::Column::ToDate.eq(to_date)).await
  }

  pub async fn find_by_availability(
    &self,
    available: bool,
  ) -> Result<Vec<promotion::Model>> {
    self.find_by_availability_at(available, utils::now()).await
  }

  pub async fn find_by_availability_at(
    &self,
    available: bool,
    at: DateTime,
  ) -> Result<Vec<promotion::Model>> {
    debug!("Processing available query for {} at {}", available, at);
    self.find_by(filter::availability(available, at)).await
  }

  pub async fn find_by_multiple_attributes(
    &self,
    filters: &Filters,
  ) -> Result<Vec<promotion::Model>> {
    self.find_by_multiple_attributes_at(filters, utils::now()).await
  }

  pub async fn find_by_multiple_attributes_at(
    &self,
    filters: &Filters,
    at: DateTime,
  ) -> Result<Vec<promotion::Model>> {
    debug!("Processing multi-attribute query for {:?}", filters);
    self.find_by(filters.condition(at)).await
  }

  pub async fn find_best_promotion_for_product(
    &self,
    product_id: i32,
  ) -> Result<Option<promotion::Model>> {
    self.find_best_promotion_for_product_at(product_id, utils::now()).await
  }

  /// Picks the active promotion with the largest effective fraction. On a
  /// tie the lowest id wins.
  pub async fn find_best_promotion_for_product_at(
    &self,
    product_id: i32,
    at: DateTime,
  ) -> Result<Option<promotion::Model>> {
    debug!("Processing best promotion query for product {}", product_id);

    let candidates = self
      .find_by(
        Condition::all()
          .add(promotion::Column::ProductId.eq(product_id))
          .add(filter::availability(true, at)),
      )
      .await?;

    Ok(best_of(candidates))
  }

  async fn find_by<F>(&self, filter: F) -> Result<Vec<promotion::Model>>
  where
    F: sea_orm::sea_query::IntoCondition,
  {
    Ok(Self::query().filter(filter).all(self.db).await?)
  }
}

/// The day before `from_date`, as long as it can still be stored.
fn expired_end(from_date: DateTime) -> Result<DateTime, Validation> {
  from_date
    .checked_sub_signed(TimeDelta::days(1))
    .filter(|date| utils::is_storable(*date))
    .ok_or_else(|| Validation::field("from_date", "out of range"))
}

fn best_of(
  promotions: impl IntoIterator<Item = promotion::Model>,
) -> Option<promotion::Model> {
  let mut max_off = 0.0;
  let mut best = None;

  for promo in promotions {
    let Some(off) = promo.effective_fraction() else {
      continue;
    };
    if off > max_off {
      max_off = off;
      best = Some(promo);
    }
  }

  best
}
