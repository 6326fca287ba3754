use axum::http::StatusCode;
use serde::Serialize;

use super::RedemptionKind;
use crate::{
  entity::redemption_coupon,
  prelude::*,
  state::AppState,
  transport::{Request, Response},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemedCoupon {
  #[serde(rename = "redemptionID")]
  pub redemption_id: String,
  pub redemption_code: String,
  pub redemption_time: chrono::DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemedInstant {
  #[serde(rename = "redemptionID")]
  pub redemption_id: String,
  pub submission_id: String,
  pub redemption_time: chrono::DateTime<Utc>,
}

impl TryFrom<redemption_coupon::Model> for RedeemedCoupon {
  type Error = Error;

  fn try_from(coupon: redemption_coupon::Model) -> Result<Self> {
    let redeemed_at = coupon.redeemed_at.ok_or_else(|| {
      Error::Internal(format!("coupon [{}] has no redemption time", coupon.id))
    })?;

    Ok(Self {
      redemption_id: coupon.id.to_string(),
      redemption_code: coupon.code,
      redemption_time: redeemed_at.and_utc(),
    })
  }
}

/// Performs the one-shot transition validated earlier. Already redeemed,
/// ineligible and unknown ids all answer 404.
pub async fn handle(app: &AppState, req: &Request) -> Result<Response> {
  let [id, kind, api_key] = req.require(["id", "redemption_type", "api_key"])?;
  info!("Redeeming id [{id}] of type [{kind}] with API key {api_key}");

  let sv = app.sv();
  sv.store.authenticate(api_key).await?;

  let kind = kind.parse::<RedemptionKind>()?;
  // ids outside the store's integer column fail like a rejected cast
  let id = id
    .parse::<i32>()
    .map_err(|err| Error::Internal(format!("invalid id `{id}`: {err}")))?;

  let res = match kind {
    RedemptionKind::Coupon => {
      let coupon = sv.coupon.redeem(id).await?;
      info!("Redeemed code [{}]", coupon.code);

      Response::json(StatusCode::OK, &RedeemedCoupon::try_from(coupon)?)
    }
    RedemptionKind::Instant => {
      let redemption = sv.instant.redeem(id).await?;
      info!("Redeemed submission [{}]", redemption.submission_id);

      Response::json(
        StatusCode::OK,
        &RedeemedInstant {
          redemption_id: redemption.id.to_string(),
          submission_id: redemption.submission_id.to_string(),
          redemption_time: redemption.redeemed_at.and_utc(),
        },
      )
    }
  };

  Ok(res)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    entity::{CouponStatus, SubmissionStatus},
    function::Function,
    testing::*,
  };

  fn redeem(id: impl ToString, kind: &str, api_key: &str) -> Request {
    Request::new("POST", "/redeem").with_query([
      ("id", id.to_string()),
      ("redemption_type", kind.to_string()),
      ("api_key", api_key.to_string()),
    ])
  }

  fn body(res: &Response) -> json::Value {
    json::from_str(res.body.as_deref().unwrap()).unwrap()
  }

  #[tokio::test]
  async fn test_coupon_redeems_exactly_once() {
    let app = test_app().await;
    let fixture = Fixture::seed(&app.db).await;
    let req = redeem(fixture.coupon.id, "COUPON", STORE_KEY);

    let res = Function::Redeem.invoke(&app, &req).await;
    assert_eq!(res.status, StatusCode::OK);

    let body = body(&res);
    assert_eq!(body["redemptionID"], fixture.coupon.id.to_string());
    assert_eq!(body["redemptionCode"], "ABC123");
    assert!(body["redemptionTime"].is_string());

    let again = Function::Redeem.invoke(&app, &req).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn test_concurrent_coupon_redeem() {
    let app = test_app().await;
    let fixture = Fixture::seed(&app.db).await;
    let req = redeem(fixture.coupon.id, "COUPON", STORE_KEY);

    let (a, b) = tokio::join!(
      Function::Redeem.invoke(&app, &req),
      Function::Redeem.invoke(&app, &req)
    );

    let mut statuses = [a.status, b.status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::NOT_FOUND]);
  }

  #[tokio::test]
  async fn test_instant_redeem() {
    let app = test_app().await;
    let fixture = Fixture::seed(&app.db).await;
    // a second submission so redemption and submission ids diverge
    let target = insert_submission(
      &app.db,
      &fixture.offer,
      "@erin",
      SubmissionStatus::Accepted,
      now() + TimeDelta::hours(1),
    )
    .await;

    let res = Function::Redeem
      .invoke(&app, &redeem(target.id, "INSTANT", STORE_KEY))
      .await;

    assert_eq!(res.status, StatusCode::OK);
    let body = body(&res);
    assert_eq!(body["submissionId"], target.id.to_string());
    assert_ne!(body["redemptionID"], body["submissionId"]);
    assert!(body["redemptionTime"].is_string());
  }

  #[tokio::test]
  async fn test_instant_requires_accepted() {
    let app = test_app().await;
    let fixture = Fixture::seed(&app.db).await;
    let pending = insert_submission(
      &app.db,
      &fixture.offer,
      "@gina",
      SubmissionStatus::Pending,
      now() + TimeDelta::hours(1),
    )
    .await;

    let res = Function::Redeem
      .invoke(&app, &redeem(pending.id, "INSTANT", STORE_KEY))
      .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn test_malformed_id_is_server_error() {
    let app = test_app().await;
    Fixture::seed(&app.db).await;

    for id in ["abc", "3000000000"] {
      for kind in ["COUPON", "INSTANT"] {
        let res = Function::Redeem
          .invoke(&app, &redeem(id, kind, STORE_KEY))
          .await;
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res.body.is_none());
      }
    }

    // the redemption type is still checked first
    let res =
      Function::Redeem.invoke(&app, &redeem("abc", "BOGUS", STORE_KEY)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
  }

  #[test]
  fn test_coupon_without_redemption_time() {
    let coupon = redemption_coupon::Model {
      id: 1,
      submission_id: 1,
      code: "ABC123".into(),
      status: CouponStatus::Redeemed,
      expire_at: now(),
      redeemed_at: None,
    };

    assert!(matches!(
      RedeemedCoupon::try_from(coupon),
      Err(Error::Internal(_))
    ));
  }

  #[tokio::test]
  async fn test_rejections_before_redeeming() {
    let app = test_app().await;
    let fixture = Fixture::seed(&app.db).await;
    let id = fixture.coupon.id;

    let cases = [
      (redeem(id, "COUPON", "store-key-2"), StatusCode::UNAUTHORIZED),
      (redeem(id, "BOGUS", STORE_KEY), StatusCode::BAD_REQUEST),
      (redeem(id, "COUPON", ""), StatusCode::BAD_REQUEST),
      (
        Request::new("POST", "/redeem").with_query([("id", id.to_string())]),
        StatusCode::BAD_REQUEST,
      ),
    ];

    for (req, status) in cases {
      assert_eq!(Function::Redeem.invoke(&app, &req).await.status, status);
    }

    // none of the above consumed the coupon
    let res = Function::Redeem
      .invoke(&app, &redeem(id, "COUPON", STORE_KEY))
      .await;
    assert_eq!(res.status, StatusCode::OK);
  }
}
