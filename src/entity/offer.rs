use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::reward;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offers")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  /// Reward handed out through coupon codes
  pub loyalty_reward_id: i32,
  /// Reward handed out on the spot for an accepted submission
  pub instant_reward_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "reward::Entity",
    from = "Column::LoyaltyRewardId",
    to = "reward::Column::Id",
    fk_name = "fk_offers_loyalty_reward"
  )]
  LoyaltyReward,
  #[sea_orm(
    belongs_to = "reward::Entity",
    from = "Column::InstantRewardId",
    to = "reward::Column::Id",
    fk_name = "fk_offers_instant_reward"
  )]
  InstantReward,
}

impl ActiveModelBehavior for ActiveModel {}
