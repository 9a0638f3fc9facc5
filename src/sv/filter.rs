use crate::{
  entity::{Category, promotion},
  prelude::*,
  utils,
};

/// Field constraints combined with logical AND. A `None` field places no
/// constraint on that column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
  pub product_name: Option<String>,
  pub category: Option<Category>,
  pub product_id: Option<i32>,
  pub from_date: Option<DateTime>,
  pub to_date: Option<DateTime>,
  pub availability: Option<bool>,
}

impl Filters {
  /// Reads filters from raw query parameters. Blank values are ignored, like
  /// absent ones. `product_name` is matched exactly as given, other values are
  /// trimmed before parsing.
  pub fn from_query(query: &HashMap<String, String>) -> Result<Self, Validation> {
    let raw = |key: &str| {
      query.get(key).map(String::as_str).filter(|value| !value.trim().is_empty())
    };
    let get = |key: &str| raw(key).map(str::trim);

    let category = get("category")
      .map(|name| {
        Category::from_name(name)
          .ok_or_else(|| Validation::Attribute(name.to_owned()))
      })
      .transpose()?;

    let product_id = get("product_id")
      .map(|id| {
        id.parse().map_err(|_| Validation::field("product_id", "must be an integer"))
      })
      .transpose()?;

    let from_date = get("from_date").map(|s| date(s, "from_date")).transpose()?;
    let to_date = get("to_date").map(|s| date(s, "to_date")).transpose()?;

    let availability = get("available")
      .or_else(|| get("availability"))
      .map(|flag| {
        parse_flag(flag)
          .ok_or_else(|| Validation::field("available", "must be a boolean flag"))
      })
      .transpose()?;

    Ok(Self {
      product_name: raw("product_name").map(str::to_owned),
      category,
      product_id,
      from_date,
      to_date,
      availability,
    })
  }

  pub fn is_empty(&self) -> bool {
    self == &Self::default()
  }

  pub fn condition(&self, at: DateTime) -> Condition {
    let mut cond = Condition::all();

    if let Some(name) = &self.product_name {
      cond = cond.add(promotion::Column::ProductName.eq(name.as_str()));
    }
    if let Some(category) = self.category {
      cond = cond.add(promotion::Column::Category.eq(category));
    }
    if let Some(product_id) = self.product_id {
      cond = cond.add(promotion::Column::ProductId.eq(product_id));
    }
    if let Some(from_date) = self.from_date {
      cond = cond.add(promotion::Column::FromDate.eq(from_date));
    }
    if let Some(to_date) = self.to_date {
      cond = cond.add(promotion::Column::ToDate.eq(to_date));
    }
    if let Some(available) = self.availability {
      cond = cond.add(availability(available, at));
    }

    cond
  }
}

/// `true` selects promotions whose window contains `at`, `false` selects the
/// complement.
pub fn availability(available: bool, at: DateTime) -> Condition {
  if available {
    Condition::all()
      .add(promotion::Column::FromDate.lte(at))
      .add(promotion::Column::ToDate.gte(at))
  } else {
    Condition::any()
      .add(promotion::Column::FromDate.gt(at))
      .add(promotion::Column::ToDate.lt(at))
  }
}

pub fn parse_flag(flag: &str) -> Option<bool> {
  match flag.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Some(true),
    "0" | "false" | "no" | "off" => Some(false),
    _ => None,
  }
}

fn date(text: &str, field: &'static str) -> Result<DateTime, Validation> {
  utils::parse_datetime(text)
    .ok_or_else(|| Validation::field(field, "must be an ISO-8601 date-time"))
}
