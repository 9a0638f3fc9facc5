use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::{StatusCode, header},
  response::IntoResponse,
};
use json::{Value, json};

use crate::{
  entity::promotion,
  prelude::*,
  state::AppState,
  sv::{self, Draft, Filters, filter},
};

type App = State<Arc<AppState>>;

pub async fn index() -> Json<Value> {
  Json(json!({
    "name": "Promotion REST API Service",
    "version": env!("CARGO_PKG_VERSION"),
    "paths": "/promotions",
  }))
}

pub async fn health(State(app): App) -> (StatusCode, Json<Value>) {
  match app.db.ping().await {
    Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok", "db": true }))),
    Err(err) => {
      warn!("Health check failed: {}", err);
      (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "status": "unavailable", "db": false })),
      )
    }
  }
}

pub async fn list(
  State(app): App,
  Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<promotion::Model>>> {
  info!("Request for promotion list");

  let filters = Filters::from_query(&query)?;
  let sv = sv::Promotion::new(&app.db);

  let promotions = if filters.is_empty() {
    sv.all().await?
  } else {
    sv.find_by_multiple_attributes(&filters).await?
  };

  info!("Returning {} promotions", promotions.len());
  Ok(Json(promotions))
}

pub async fn get(
  State(app): App,
  Path(id): Path<i32>,
) -> Result<Json<promotion::Model>> {
  info!("Request for promotion with id: {}", id);

  let promo = sv::Promotion::new(&app.db).find_or_fail(id).await?;
  Ok(Json(promo))
}

pub async fn create(
  State(app): App,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse> {
  info!("Request to create a promotion");

  let draft = Draft::from_json(&read_body(body)?)?;
  let promo = sv::Promotion::new(&app.db).create(draft).await?;
  let location = format!("/promotions/{}", promo.id);

  info!("Promotion with ID [{}] created", promo.id);
  Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(promo)))
}

pub async fn update(
  State(app): App,
  Path(id): Path<i32>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<promotion::Model>> {
  info!("Request to update promotion with id: {}", id);

  let draft = Draft::from_json(&read_body(body)?)?;
  let promo = sv::Promotion::new(&app.db).update(id, draft).await?;

  info!("Promotion with ID [{}] updated", promo.id);
  Ok(Json(promo))
}

pub async fn expire(
  State(app): App,
  Path(id): Path<i32>,
) -> Result<Json<promotion::Model>> {
  info!("Request to expire promotion with id: {}", id);

  let promo = sv::Promotion::new(&app.db).expire(id).await?;
  Ok(Json(promo))
}

pub async fn delete(State(app): App, Path(id): Path<i32>) -> Result<StatusCode> {
  info!("Request to delete promotion with id: {}", id);

  match sv::Promotion::new(&app.db).delete(id).await {
    Ok(()) | Err(Error::NotFound(_)) => {
      info!("Promotion with ID [{}] delete complete", id);
      Ok(StatusCode::NO_CONTENT)
    }
    Err(err) => Err(err),
  }
}

pub async fn best(
  State(app): App,
  Path(product_id): Path<i32>,
) -> Result<Json<promotion::Model>> {
  info!("Request for best promotion of product: {}", product_id);

  let promo = sv::Promotion::new(&app.db)
    .find_best_promotion_for_product(product_id)
    .await?
    .ok_or(Error::NoActivePromotion(product_id))?;

  Ok(Json(promo))
}

pub async fn by_product_availability(
  State(app): App,
  Path((product_id, flag)): Path<(i32, String)>,
) -> Result<Json<Vec<promotion::Model>>> {
  let available = filter::parse_flag(&flag)
    .ok_or_else(|| Validation::field("available", "must be a boolean flag"))?;

  let filters = Filters {
    product_id: Some(product_id),
    availability: Some(available),
    ..Default::default()
  };

  let promotions =
    sv::Promotion::new(&app.db).find_by_multiple_attributes(&filters).await?;
  Ok(Json(promotions))
}

fn read_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value> {
  match body {
    Ok(Json(data)) => Ok(data),
    Err(rejection) => {
      debug!("Rejected request body: {}", rejection);
      Err(Validation::BadData.into())
    }
  }
}
