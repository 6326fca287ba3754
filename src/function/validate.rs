use axum::http::StatusCode;
use serde::Serialize;

use super::RedemptionKind;
use crate::{
  entity::CouponStatus,
  prelude::*,
  state::AppState,
  transport::{Request, Response},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidCoupon {
  #[serde(rename = "redemptionID")]
  pub redemption_id: String,
  pub instagram_account: String,
  pub reward_description: String,
  pub redemption_status: CouponStatus,
  pub store_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidInstant {
  pub submission_id: String,
  pub instagram_account: String,
  pub reward_description: String,
  pub store_name: String,
}

/// Answers whether `code` could be redeemed right now, without redeeming it.
pub async fn handle(app: &AppState, req: &Request) -> Result<Response> {
  let [code, kind, api_key] =
    req.require(["code", "redemption_type", "api_key"])?;
  info!("Validating code [{code}] of type [{kind}] with API key {api_key}");

  let sv = app.sv();
  let store = sv.store.authenticate(api_key).await?;

  let res = match kind.parse::<RedemptionKind>()? {
    RedemptionKind::Coupon => {
      let coupon = sv.coupon.eligible(code).await?;
      Response::json(
        StatusCode::OK,
        &ValidCoupon {
          redemption_id: coupon.id.to_string(),
          instagram_account: coupon.instagram_account,
          reward_description: coupon.reward_description,
          redemption_status: coupon.status,
          store_name: store.name,
        },
      )
    }
    // the code of an instant reward is the submitter's account
    RedemptionKind::Instant => {
      let submission = sv.instant.eligible(code).await?;
      Response::json(
        StatusCode::OK,
        &ValidInstant {
          submission_id: submission.id.to_string(),
          instagram_account: submission.instagram_account,
          reward_description: submission.reward_description,
          store_name: store.name,
        },
      )
    }
  };

  info!("Redemption code [{code}] FOUND");
  Ok(res)
}
