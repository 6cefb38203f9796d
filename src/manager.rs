use crate::client::{ApiError, SubscriptionApi};
use crate::editor::{ValidationError, validate_draft};
use crate::models::{RecordId, SubscriptionDraft, SubscriptionRecord};
use crate::store::{ListSnapshot, SubscriptionStore};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("failed to load subscriptions: {0}")]
    Fetch(#[source] ApiError),

    #[error("failed to save subscription: {0}")]
    Save(#[source] ApiError),

    #[error("failed to delete subscription: {0}")]
    Delete(#[source] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// Mediates every call to the subscriptions API.
///
/// Writes never touch the local list directly: each successful mutation is
/// followed by a full re-fetch, and the list is only replaced when that
/// fetch succeeds.
pub struct RecordManager {
    api: Arc<dyn SubscriptionApi>,
    store: SubscriptionStore,
}

impl RecordManager {
    pub fn new(api: Arc<dyn SubscriptionApi>) -> Self {
        Self {
            api,
            store: SubscriptionStore::new(),
        }
    }

    pub fn store(&self) -> &SubscriptionStore {
        &self.store
    }

    pub fn records(&self) -> Arc<Vec<SubscriptionRecord>> {
        self.store.records()
    }

    pub fn find(&self, id: &RecordId) -> Option<SubscriptionRecord> {
        self.store.records().iter().find(|s| &s.id == id).cloned()
    }

    pub async fn list(&self) -> Result<ListSnapshot, ManagerError> {
        match self.api.list().await {
            Ok(records) => {
                let snapshot = self.store.replace(records);
                info!(
                    version = snapshot.version,
                    count = snapshot.records.len(),
                    "subscriptions refreshed"
                );
                Ok(snapshot)
            }
            Err(err) => {
                error!("fetch failed: {err}");
                Err(ManagerError::Fetch(err))
            }
        }
    }

    pub async fn create(&self, draft: SubscriptionDraft) -> Result<ListSnapshot, ManagerError> {
        validate_draft(&draft)?;
        if let Err(err) = self.api.create(&draft).await {
            error!("create failed: {err}");
            return Err(ManagerError::Save(err));
        }
        info!(name = %draft.name, "subscription created");
        self.list().await
    }

    pub async fn update(&self, id: &RecordId, draft: SubscriptionDraft) -> Result<ListSnapshot, ManagerError> {
        validate_draft(&draft)?;
        let record = draft.with_id(id.clone());
        if let Err(err) = self.api.update(&record).await {
            error!(%id, "update failed: {err}");
            return Err(ManagerError::Save(err));
        }
        info!(%id, "subscription updated");
        self.list().await
    }

    pub async fn delete(
        &self,
        id: &RecordId,
        confirmation: DeleteConfirmation,
    ) -> Result<DeleteOutcome, ManagerError> {
        if confirmation == DeleteConfirmation::Declined {
            return Ok(DeleteOutcome::Cancelled);
        }
        if let Err(err) = self.api.delete(id).await {
            error!(%id, "delete failed: {err}");
            return Err(ManagerError::Delete(err));
        }
        info!(%id, "subscription deleted");
        self.list().await?;
        Ok(DeleteOutcome::Deleted)
    }
}
