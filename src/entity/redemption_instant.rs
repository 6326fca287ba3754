//! Append-only log of instant rewards handed out for accepted submissions

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::submission;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "redemptions_instant")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub submission_id: i32,
  pub redeemed_at: DateTime,
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
