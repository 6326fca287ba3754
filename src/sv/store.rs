use crate::{entity::store, prelude::*};

pub struct Store<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Store<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Resolves the store owning `api_key`.
  pub async fn authenticate(&self, api_key: &str) -> Result<store::Model> {
    let store = store::Entity::find()
      .filter(store::Column::ApiKey.eq(api_key))
      .one(self.db)
      .await?
      .ok_or(Error::Unauthorized)?;

    info!("Retrieved store as [{}]", store.name);
    Ok(store)
  }
}
