use json::{Map, Value};

use crate::{
  entity::{Category, promotion},
  prelude::*,
  utils,
};

/// Caller-supplied promotion fields, read from a JSON mapping. Never carries an
/// identity; the store assigns one on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
  pub product_name: String,
  pub category: Category,
  pub product_id: i32,
  pub amount: i32,
  pub description: Option<String>,
  pub from_date: DateTime,
  pub to_date: DateTime,
}

impl Draft {
  pub fn from_json(data: &Value) -> Result<Self, Validation> {
    let map = data.as_object().ok_or(Validation::BadData)?;

    let product_name = text(required(map, "product_name")?, "product_name")?;
    if product_name.trim().is_empty() {
      return Err(Validation::field("product_name", "must not be empty"));
    }

    let category = match required(map, "category")? {
      Value::String(name) => Category::from_name(name)
        .ok_or_else(|| Validation::Attribute(name.clone()))?,
      other => return Err(Validation::Attribute(other.to_string())),
    };

    let product_id = integer(required(map, "product_id")?, "product_id")?;
    let amount = integer(required(map, "amount")?, "amount")?;

    let description = match map.get("description") {
      None | Some(Value::Null) => None,
      Some(value) => Some(text(value, "description")?),
    };

    let from_date = timestamp(required(map, "from_date")?, "from_date")?;
    let to_date = timestamp(required(map, "to_date")?, "to_date")?;

    Ok(Self {
      product_name,
      category,
      product_id,
      amount,
      description,
      from_date,
      to_date,
    })
  }

  /// Rules every new promotion must satisfy.
  pub fn check(&self) -> Result<(), Validation> {
    if self.category == Category::Discount && self.amount > 100 {
      return Err(Validation::DiscountTooLarge);
    }
    if self.amount <= 0 {
      return Err(Validation::NonPositiveAmount);
    }
    Ok(())
  }

  pub fn into_active_model(self) -> promotion::ActiveModel {
    promotion::ActiveModel {
      id: NotSet,
      product_name: Set(self.product_name),
      category: Set(self.category),
      product_id: Set(self.product_id),
      amount: Set(self.amount),
      description: Set(self.description),
      from_date: Set(self.from_date),
      to_date: Set(self.to_date),
    }
  }

  /// Overwrites every mutable field of `model`, keeping its identity.
  pub fn apply(self, model: promotion::Model) -> promotion::ActiveModel {
    let existing: promotion::ActiveModel = model.into();
    promotion::ActiveModel { id: existing.id, ..self.into_active_model() }
  }
}

fn required<'a>(
  map: &'a Map<String, Value>,
  key: &'static str,
) -> Result<&'a Value, Validation> {
  map.get(key).ok_or(Validation::Missing(key))
}

fn text(value: &Value, field: &'static str) -> Result<String, Validation> {
  value
    .as_str()
    .map(str::to_owned)
    .ok_or_else(|| Validation::field(field, "must be a string"))
}

fn integer(value: &Value, field: &'static str) -> Result<i32, Validation> {
  let number = match value {
    Value::Number(number) => number.as_i64(),
    Value::String(text) => text.trim().parse().ok(),
    _ => None,
  };

  number
    .and_then(|number| i32::try_from(number).ok())
    .ok_or_else(|| Validation::field(field, "must be an integer"))
}

fn timestamp(value: &Value, field: &'static str) -> Result<DateTime, Validation> {
  value
    .as_str()
    .and_then(utils::parse_datetime)
    .ok_or_else(|| Validation::field(field, "must be an ISO-8601 date-time"))
}

#[cfg(test)]
mod tests {
  use json::json;

  use super::*;

  fn payload() -> Value {
    json!({
      "id": 1,
      "product_name": "iwatch",
      "category": "Discount",
      "product_id": 100,
      "amount": 10,
      "description": "Great Deal",
      "from_date": "2021-10-13T00:00:00",
      "to_date": "2021-10-19T00:00:00",
    })
  }

  fn without(key: &str) -> Value {
    let mut data = payload();
    data.as_object_mut().unwrap().remove(key);
    data
  }

  #[test]
  fn test_deserialize_a_promotion() {
    let draft = Draft::from_json(&payload()).unwrap();

    assert_eq!(draft.product_name, "iwatch");
    assert_eq!(draft.category, Category::Discount);
    assert_eq!(draft.product_id, 100);
    assert_eq!(draft.amount, 10);
    assert_eq!(draft.description.as_deref(), Some("Great Deal"));
    assert_eq!(utils::parse_datetime("2021-10-13"), Some(draft.from_date));
    assert_eq!(utils::parse_datetime("2021-10-19"), Some(draft.to_date));
  }

  #[test]
  fn test_deserialize_ignores_identity() {
    let active = Draft::from_json(&payload()).unwrap().into_active_model();
    assert!(active.id.is_not_set());
  }

  #[test]
  fn test_deserialize_bad_data() {
    let err = Draft::from_json(&json!("this is not a dictionary")).unwrap_err();
    assert_eq!(err, Validation::BadData);

    let err = Draft::from_json(&json!([1, 2, 3])).unwrap_err();
    assert_eq!(err, Validation::BadData);
  }

  #[test]
  fn test_deserialize_missing_to_date() {
    let err = Draft::from_json(&without("to_date")).unwrap_err();

    assert_eq!(err, Validation::Missing("to_date"));
    assert!(err.to_string().contains("to_date"));
  }

  #[test]
  fn test_deserialize_missing_any_required_key() {
    for key in
      ["product_name", "category", "product_id", "amount", "from_date", "to_date"]
    {
      assert_eq!(
        Draft::from_json(&without(key)).unwrap_err(),
        Validation::Missing(key)
      );
    }
  }

  #[test]
  fn test_description_is_optional() {
    let draft = Draft::from_json(&without("description")).unwrap();
    assert_eq!(draft.description, None);

    let mut data = payload();
    data["description"] = Value::Null;
    assert_eq!(Draft::from_json(&data).unwrap().description, None);
  }

  #[test]
  fn test_deserialize_bad_attribute() {
    let mut data = payload();
    data["category"] = json!("discount");

    let err = Draft::from_json(&data).unwrap_err();
    assert_eq!(err, Validation::Attribute("discount".into()));
    assert!(err.to_string().contains("discount"));
  }

  #[test]
  fn test_deserialize_malformed_fields() {
    let mut data = payload();
    data["amount"] = json!("ten");
    assert!(matches!(
      Draft::from_json(&data),
      Err(Validation::Field { field: "amount", .. })
    ));

    let mut data = payload();
    data["from_date"] = json!("yesterday");
    assert!(matches!(
      Draft::from_json(&data),
      Err(Validation::Field { field: "from_date", .. })
    ));

    let mut data = payload();
    data["product_name"] = json!("  ");
    assert!(matches!(
      Draft::from_json(&data),
      Err(Validation::Field { field: "product_name", .. })
    ));
  }

  #[test]
  fn test_deserialize_rejects_five_digit_years() {
    let mut data = payload();
    data["to_date"] = json!("+10000-01-01T00:00:00");
    assert!(matches!(
      Draft::from_json(&data),
      Err(Validation::Field { field: "to_date", .. })
    ));
  }

  #[test]
  fn test_round_trip_keeps_fields() {
    let model = promotion::Model {
      id: 7,
      product_name: "Macbook".into(),
      category: Category::BuyOneGetOneFree,
      product_id: 11111,
      amount: 3,
      description: None,
      from_date: utils::parse_datetime("2021-10-13T08:15:30.5").unwrap(),
      to_date: utils::parse_datetime("2021-10-19T00:00:00").unwrap(),
    };

    let draft = Draft::from_json(&json::to_value(&model).unwrap()).unwrap();

    assert_eq!(draft.product_name, model.product_name);
    assert_eq!(draft.category, model.category);
    assert_eq!(draft.product_id, model.product_id);
    assert_eq!(draft.amount, model.amount);
    assert_eq!(draft.description, model.description);
    assert_eq!(draft.from_date, model.from_date);
    assert_eq!(draft.to_date, model.to_date);
  }

  fn draft(category: Category, amount: i32) -> Draft {
    Draft { category, amount, ..Draft::from_json(&payload()).unwrap() }
  }

  #[test]
  fn test_discount_bounds() {
    assert_eq!(
      draft(Category::Discount, 101).check(),
      Err(Validation::DiscountTooLarge)
    );
    assert_eq!(
      draft(Category::Discount, 0).check(),
      Err(Validation::NonPositiveAmount)
    );
    assert_eq!(
      draft(Category::Discount, -1).check(),
      Err(Validation::NonPositiveAmount)
    );
    assert_eq!(draft(Category::Discount, 1).check(), Ok(()));
    assert_eq!(draft(Category::Discount, 100).check(), Ok(()));
  }

  #[test]
  fn test_bogof_bounds() {
    assert_eq!(
      draft(Category::BuyOneGetOneFree, 0).check(),
      Err(Validation::NonPositiveAmount)
    );
    assert_eq!(draft(Category::BuyOneGetOneFree, 1).check(), Ok(()));
    assert_eq!(draft(Category::BuyOneGetOneFree, 500).check(), Ok(()));
  }
}
