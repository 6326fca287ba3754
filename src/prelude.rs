pub use std::{collections::HashMap, sync::Arc, time::Duration};

pub use anyhow::Context;
pub use async_trait::async_trait;
pub use chrono::{TimeDelta, Utc};
pub use sea_orm::{
  ColumnTrait, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
  FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
  RelationTrait,
};
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, NotFound, Result};
