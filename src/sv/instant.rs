//! Instant rewards: an accepted submission may be redeemed on the spot.
//! Redemptions are appended to their own log and never touch the submission.

use sea_orm::sea_query::{Expr, Query};

use super::db_now;

use crate::{
  entity::{SubmissionStatus, offer, redemption_instant, reward, submission},
  prelude::*,
};

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct EligibleSubmission {
  pub id: i32,
  pub instagram_account: String,
  pub reward_description: String,
}

pub struct Instant<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Instant<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Most recent accepted submission of `account` whose instant reward has
  /// not expired yet.
  pub async fn eligible(&self, account: &str) -> Result<EligibleSubmission> {
    let submission = submission::Entity::find()
      .select_only()
      .column(submission::Column::Id)
      .column(submission::Column::InstagramAccount)
      .column_as(reward::Column::Description, "reward_description")
      .join(JoinType::InnerJoin, submission::Relation::Offer.def())
      .join(JoinType::InnerJoin, offer::Relation::InstantReward.def())
      .filter(submission::Column::InstagramAccount.eq(account))
      .filter(submission::Column::Status.eq(SubmissionStatus::Accepted))
      .filter(
        Expr::col((
          submission::Entity,
          submission::Column::InstantRewardExpireAt,
        ))
        .gt(db_now()),
      )
      .order_by_desc(submission::Column::Id)
      .into_model::<EligibleSubmission>()
      .one(self.db)
      .await?
      .ok_or_else(|| NotFound::Account(account.into()))?;

    Ok(submission)
  }

  /// Appends a redemption for the submission, conditioned on it still being
  /// accepted. Check and insert are one `INSERT ... SELECT` statement.
  pub async fn redeem(
    &self,
    submission_id: i32,
  ) -> Result<redemption_instant::Model> {
    let accepted = Query::select()
      .column(submission::Column::Id)
      .expr(db_now())
      .from(submission::Entity)
      .and_where(submission::Column::Id.eq(submission_id))
      .and_where(submission::Column::Status.eq(SubmissionStatus::Accepted))
      .to_owned();

    let insert = Query::insert()
      .into_table(redemption_instant::Entity)
      .columns([
        redemption_instant::Column::SubmissionId,
        redemption_instant::Column::RedeemedAt,
      ])
      .select_from(accepted)
      .map_err(|err| Error::Internal(err.to_string()))?
      .returning(Query::returning().columns([
        redemption_instant::Column::Id,
        redemption_instant::Column::SubmissionId,
        redemption_instant::Column::RedeemedAt,
      ]))
      .to_owned();

    let stmt = self.db.get_database_backend().build(&insert);
    let redemption = redemption_instant::Model::find_by_statement(stmt)
      .one(self.db)
      .await?
      .ok_or_else(|| NotFound::Submission(submission_id.to_string()))?;

    Ok(redemption)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::*;

  #[tokio::test]
  async fn test_eligible_submission() {
    let db = setup_test_db().await;
    let fixture = Fixture::seed(&db).await;

    let eligible = Instant::new(&db).eligible("@alice").await.unwrap();

    assert_eq!(
      eligible,
      EligibleSubmission {
        id: fixture.submission.id,
        instagram_account: "@alice".into(),
        reward_description: "Free Cookie".into(),
      }
    );
  }

  #[tokio::test]
  async fn test_most_recent_submission_wins() {
    let db = setup_test_db().await;
    let fixture = Fixture::seed(&db).await;
    let newer = insert_submission(
      &db,
      &fixture.offer,
      "@alice",
      SubmissionStatus::Accepted,
      now() + TimeDelta::hours(2),
    )
    .await;

    let eligible = Instant::new(&db).eligible("@alice").await.unwrap();

    assert_eq!(eligible.id, newer.id);
  }

  #[tokio::test]
  async fn test_ineligible_submissions() {
    let db = setup_test_db().await;
    let fixture = Fixture::seed(&db).await;
    insert_submission(
      &db,
      &fixture.offer,
      "@bob",
      SubmissionStatus::Accepted,
      now() - TimeDelta::minutes(5),
    )
    .await;
    insert_submission(
      &db,
      &fixture.offer,
      "@carol",
      SubmissionStatus::Pending,
      now() + TimeDelta::hours(1),
    )
    .await;

    let sv = Instant::new(&db);
    for account in ["@bob", "@carol", "@nobody"] {
      assert!(matches!(
        sv.eligible(account).await,
        Err(Error::NotFound(NotFound::Account(_)))
      ));
    }
  }

  #[tokio::test]
  async fn test_expiry_follows_store_clock() {
    let db = setup_test_db().await;
    let fixture = Fixture::seed(&db).await;

    submission::Entity::update_many()
      .col_expr(submission::Column::InstantRewardExpireAt, db_now())
      .filter(submission::Column::Id.eq(fixture.submission.id))
      .exec(&db)
      .await
      .unwrap();

    assert!(matches!(
      Instant::new(&db).eligible("@alice").await,
      Err(Error::NotFound(NotFound::Account(_)))
    ));
  }

  #[tokio::test]
  async fn test_redeem_accepted_submission() {
    let db = setup_test_db().await;
    let fixture = Fixture::seed(&db).await;
    // offset ids so a redemption id can't coincide with the submission id
    insert_submission(
      &db,
      &fixture.offer,
      "@dave",
      SubmissionStatus::Rejected,
      now(),
    )
    .await;
    let target = insert_submission(
      &db,
      &fixture.offer,
      "@erin",
      SubmissionStatus::Accepted,
      now() + TimeDelta::hours(1),
    )
    .await;

    let before = now() - TimeDelta::seconds(1);
    let redemption = Instant::new(&db).redeem(target.id).await.unwrap();
    let after = now();

    assert_eq!(redemption.submission_id, target.id);
    assert_ne!(redemption.id, target.id);
    assert!(before <= redemption.redeemed_at && redemption.redeemed_at <= after);

    let stored = submission::Entity::find_by_id(target.id)
      .one(&db)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(stored.status, SubmissionStatus::Accepted);
  }

  #[tokio::test]
  async fn test_redeem_requires_accepted() {
    let db = setup_test_db().await;
    let fixture = Fixture::seed(&db).await;
    let rejected = insert_submission(
      &db,
      &fixture.offer,
      "@frank",
      SubmissionStatus::Rejected,
      now() + TimeDelta::hours(1),
    )
    .await;

    let sv = Instant::new(&db);
    assert!(matches!(
      sv.redeem(rejected.id).await,
      Err(Error::NotFound(NotFound::Submission(_)))
    ));
    assert!(sv.redeem(9999).await.is_err());

    let logged = redemption_instant::Entity::find().all(&db).await.unwrap();
    assert!(logged.is_empty());
  }
}
