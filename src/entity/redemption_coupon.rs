use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::submission;

#[derive(
  Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize,
  Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponStatus {
  #[sea_orm(string_value = "PENDING")]
  Pending,
  #[sea_orm(string_value = "REDEEMED")]
  Redeemed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "redemptions_coupon")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub submission_id: i32,
  pub code: String,
  pub status: CouponStatus,
  pub expire_at: DateTime,
  pub redeemed_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "submission::Entity",
    from = "Column::SubmissionId",
    to = "submission::Column::Id"
  )]
  Submission,
}

impl Related<submission::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Submission.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
