pub use anyhow::Context;
pub use chrono::{NaiveDateTime as DateTime, SubsecRound, TimeZone, Utc};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection,
  EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};
