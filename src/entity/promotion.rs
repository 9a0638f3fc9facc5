use sea_orm::{ActiveEnum, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Category {
  /// `amount` percent off.
  #[sea_orm(string_value = "Discount")]
  Discount,
  /// Buy `amount` items, get one free.
  #[sea_orm(string_value = "BuyOneGetOneFree")]
  BuyOneGetOneFree,
  #[sea_orm(string_value = "Unknown")]
  #[default]
  Unknown,
}

impl Category {
  /// Case-sensitive lookup by the stored variant name.
  pub fn from_name(name: &str) -> Option<Self> {
    Self::try_from_value(&name.to_owned()).ok()
  }

  pub fn name(&self) -> String {
    self.to_value()
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "promotions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub product_name: String,
  pub category: Category,
  pub product_id: i32,
  pub amount: i32,
  pub description: Option<String>,
  pub from_date: DateTime,
  pub to_date: DateTime,
}

impl Model {
  /// Both ends of the window are inclusive.
  pub fn is_available(&self, at: DateTime) -> bool {
    self.from_date <= at && at <= self.to_date
  }

  /// Share of the price the customer saves, used to rank offers against each
  /// other. `None` when the offer has no comparable value.
  pub fn effective_fraction(&self) -> Option<f64> {
    if self.amount <= 0 {
      return None;
    }

    match self.category {
      Category::Discount => Some(self.amount as f64 / 100.0),
      Category::BuyOneGetOneFree => Some(1.0 / self.amount as f64),
      Category::Unknown => None,
    }
  }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn at(day: u32, hour: u32) -> DateTime {
    NaiveDate::from_ymd_opt(2021, 10, day)
      .and_then(|date| date.and_hms_opt(hour, 0, 0))
      .unwrap()
  }

  fn model(category: Category, amount: i32) -> Model {
    Model {
      id: 1,
      product_name: "Macbook".into(),
      category,
      product_id: 11111,
      amount,
      description: Some("Great deal".into()),
      from_date: at(13, 0),
      to_date: at(19, 0),
    }
  }

  #[test]
  fn test_availability_is_inclusive() {
    let promo = model(Category::Discount, 10);

    assert!(promo.is_available(at(13, 0)));
    assert!(promo.is_available(at(16, 12)));
    assert!(promo.is_available(at(19, 0)));
    assert!(!promo.is_available(at(12, 23)));
    assert!(!promo.is_available(at(19, 1)));
  }

  #[test]
  fn test_effective_fraction() {
    assert_eq!(model(Category::Discount, 20).effective_fraction(), Some(0.2));
    assert_eq!(
      model(Category::BuyOneGetOneFree, 4).effective_fraction(),
      Some(0.25)
    );
    assert_eq!(model(Category::Unknown, 50).effective_fraction(), None);
    assert_eq!(model(Category::BuyOneGetOneFree, 0).effective_fraction(), None);
  }

  #[test]
  fn test_category_names_are_case_sensitive() {
    assert_eq!(Category::from_name("Discount"), Some(Category::Discount));
    assert_eq!(
      Category::from_name("BuyOneGetOneFree"),
      Some(Category::BuyOneGetOneFree)
    );
    assert_eq!(Category::from_name("discount"), None);
    assert_eq!(Category::from_name("BOGOF"), None);
  }

  #[test]
  fn test_category_name_matches_serialized_form() {
    for category in
      [Category::Discount, Category::BuyOneGetOneFree, Category::Unknown]
    {
      assert_eq!(json::to_value(category).unwrap(), category.name());
      assert_eq!(Category::from_name(&category.name()), Some(category));
    }
  }

  #[test]
  fn test_serialize_uses_variant_names_and_iso_dates() {
    let data = json::to_value(model(Category::BuyOneGetOneFree, 3)).unwrap();

    assert_eq!(data["id"], 1);
    assert_eq!(data["product_name"], "Macbook");
    assert_eq!(data["category"], "BuyOneGetOneFree");
    assert_eq!(data["product_id"], 11111);
    assert_eq!(data["amount"], 3);
    assert_eq!(data["description"], "Great deal");
    assert_eq!(data["from_date"], "2021-10-13T00:00:00");
    assert_eq!(data["to_date"], "2021-10-19T00:00:00");
  }
}
