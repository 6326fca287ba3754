//! In-memory database and fixtures shared by the unit tests.

use chrono::NaiveDateTime as DateTime;
use sea_orm::{ActiveModelTrait, DbBackend, NotSet, Schema, Set};

use crate::{
  config::Config,
  entity::*,
  prelude::*,
  state::AppState,
};

pub const STORE_KEY: &str = "store-key-1";
pub const STORE_NAME: &str = "Acme Cafe";

pub async fn setup_test_db() -> DatabaseConnection {
  let db = Database::connect("sqlite::memory:").await.unwrap();
  let schema = Schema::new(DbBackend::Sqlite);

  macro_rules! create {
    ($($entity:path),* $(,)?) => {$(
      let stmt = schema.create_table_from_entity($entity);
      db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
    )*};
  }

  create!(
    store::Entity,
    reward::Entity,
    offer::Entity,
    submission::Entity,
    redemption_coupon::Entity,
    redemption_instant::Entity,
  );

  db
}

pub async fn test_app() -> Arc<AppState> {
  Arc::new(AppState::with_db(setup_test_db().await, Config::default()))
}

pub fn now() -> DateTime {
  Utc::now().naive_utc()
}

/// Seeded rows of the canonical "Acme Cafe" scenario.
pub struct Fixture {
  pub store: store::Model,
  pub offer: offer::Model,
  pub submission: submission::Model,
  pub coupon: redemption_coupon::Model,
}

impl Fixture {
  /// `@alice` has an accepted submission with a live instant reward and a
  /// pending, unexpired coupon `ABC123`.
  pub async fn seed(db: &DatabaseConnection) -> Self {
    let store = insert_store(db, STORE_NAME, STORE_KEY).await;
    let loyalty = insert_reward(db, "Free Coffee").await;
    let instant = insert_reward(db, "Free Cookie").await;

    let offer = offer::ActiveModel {
      id: NotSet,
      loyalty_reward_id: Set(loyalty.id),
      instant_reward_id: Set(Some(instant.id)),
    }
    .insert(db)
    .await
    .unwrap();

    let submission = insert_submission(
      db,
      &offer,
      "@alice",
      SubmissionStatus::Accepted,
      now() + TimeDelta::hours(1),
    )
    .await;

    let coupon = insert_coupon(
      db,
      &submission,
      "ABC123",
      CouponStatus::Pending,
      now() + TimeDelta::days(30),
    )
    .await;

    Self { store, offer, submission, coupon }
  }
}

pub async fn insert_store(
  db: &DatabaseConnection,
  name: &str,
  api_key: &str,
) -> store::Model {
  store::ActiveModel {
    id: NotSet,
    name: Set(name.into()),
    api_key: Set(api_key.into()),
  }
  .insert(db)
  .await
  .unwrap()
}

pub async fn insert_reward(
  db: &DatabaseConnection,
  description: &str,
) -> reward::Model {
  reward::ActiveModel { id: NotSet, description: Set(description.into()) }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_submission(
  db: &DatabaseConnection,
  offer: &offer::Model,
  account: &str,
  status: SubmissionStatus,
  instant_reward_expire_at: DateTime,
) -> submission::Model {
  submission::ActiveModel {
    id: NotSet,
    offer_id: Set(offer.id),
    instagram_account: Set(account.into()),
    status: Set(status),
    instant_reward_expire_at: Set(instant_reward_expire_at),
  }
  .insert(db)
  .await
  .unwrap()
}

pub async fn insert_coupon(
  db: &DatabaseConnection,
  submission: &submission::Model,
  code: &str,
  status: CouponStatus,
  expire_at: DateTime,
) -> redemption_coupon::Model {
  redemption_coupon::ActiveModel {
    id: NotSet,
    submission_id: Set(submission.id),
    code: Set(code.into()),
    status: Set(status),
    expire_at: Set(expire_at),
    redeemed_at: Set(None),
  }
  .insert(db)
  .await
  .unwrap()
}
