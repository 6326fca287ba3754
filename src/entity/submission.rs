use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::offer;

#[derive(
  Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize,
  Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
  #[sea_orm(string_value = "PENDING")]
  Pending,
  #[sea_orm(string_value = "ACCEPTED")]
  Accepted,
  #[sea_orm(string_value = "REJECTED")]
  Rejected,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub offer_id: i32,
  pub instagram_account: String,
  pub status: SubmissionStatus,
  pub instant_reward_expire_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "offer::Entity",
    from = "Column::OfferId",
    to = "offer::Column::Id"
  )]
  Offer,
}

impl Related<offer::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Offer.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
