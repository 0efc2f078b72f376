use crate::favorite_store::StoreError;
use crate::model::{CharacterId, FavoriteRecord};
use sync_framework::StoreRecord;

impl StoreRecord for FavoriteRecord {
    type Id = CharacterId;
    type Error = StoreError;

    fn id(&self) -> CharacterId {
        self.id
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.id.0 == 0 {
            return Err(StoreError::ValidationError(
                "character id must be positive".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(StoreError::ValidationError(format!(
                "character {} has no name",
                self.id
            )));
        }
        Ok(())
    }
}
