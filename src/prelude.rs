pub use std::{collections::HashMap, sync::Arc, time::Duration};

pub use anyhow::Context;
pub use chrono::{NaiveDateTime as DateTime, TimeDelta, Utc};
pub use migration::MigratorTrait;
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, Condition, Database, DatabaseConnection,
  EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
};
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result, Validation};
