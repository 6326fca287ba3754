//! Coupon redemptions: single-use codes that go PENDING -> REDEEMED once.

use sea_orm::sea_query::Expr;

use super::db_now;

use crate::{
  entity::{CouponStatus, offer, redemption_coupon, reward, submission},
  prelude::*,
};

/// A pending, unexpired coupon together with what redeeming it yields.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct EligibleCoupon {
  pub id: i32,
  pub instagram_account: String,
  pub reward_description: String,
  pub status: CouponStatus,
}

pub struct Coupon<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Coupon<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn eligible(&self, code: &str) -> Result<EligibleCoupon> {
    let coupon = redemption_coupon::Entity::find()
      .select_only()
      .column(redemption_coupon::Column::Id)
      .column(redemption_coupon::Column::Status)
      .column(submission::Column::InstagramAccount)
      .column_as(reward::Column::Description, "reward_description")
      .join(
        JoinType::InnerJoin,
        redemption_coupon::Relation::Submission.def(),
      )
      .join(JoinType::InnerJoin, submission::Relation::Offer.def())
      .join(JoinType::InnerJoin, offer::Relation::LoyaltyReward.def())
      .filter(redemption_coupon::Column::Code.eq(code))
      .filter(redemption_coupon::Column::Status.eq(CouponStatus::Pending))
      .filter(
        Expr::col((
          redemption_coupon::Entity,
          redemption_coupon::Column::ExpireAt,
        ))
        .gt(db_now()),
      )
      .into_model::<EligibleCoupon>()
      .one(self.db)
      .await?
      .ok_or_else(|| NotFound::Code(code.into()))?;

    Ok(coupon)
  }

  /// Flips a pending coupon to redeemed in a single conditional update, so
  /// of two concurrent attempts only the first matches a row.
  pub async fn redeem(&self, id: i32) -> Result<redemption_coupon::Model> {
    let redeemed = redemption_coupon::Entity::update_many()
      .col_expr(
        redemption_coupon::Column::Status,
        Expr::value(CouponStatus::Redeemed),
      )
      .col_expr(redemption_coupon::Column::RedeemedAt, db_now())
      .filter(redemption_coupon::Column::Id.eq(id))
      .filter(redemption_coupon::Column::Status.eq(CouponStatus::Pending))
      .exec_with_returning(self.db)
      .await?
      .into_iter()
      .next()
      .ok_or_else(|| NotFound::Coupon(id.to_string()))?;

    Ok(redeemed)
  }
}
