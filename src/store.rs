use crate::models::SubscriptionRecord;
use std::sync::Arc;
use tokio::sync::watch;

/// One published version of the subscription list.
#[derive(Debug, Clone, Default)]
pub struct ListSnapshot {
    pub version: u64,
    pub records: Arc<Vec<SubscriptionRecord>>,
}

/// Owns the authoritative list. The list is only ever replaced as a whole,
/// and every replacement is broadcast to subscribers.
pub struct SubscriptionStore {
    tx: watch::Sender<ListSnapshot>,
}

impl Default for SubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ListSnapshot::default());
        Self { tx }
    }

    pub fn current(&self) -> ListSnapshot {
        self.tx.borrow().clone()
    }

    pub fn records(&self) -> Arc<Vec<SubscriptionRecord>> {
        Arc::clone(&self.tx.borrow().records)
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.tx.subscribe()
    }

    pub(crate) fn replace(&self, records: Vec<SubscriptionRecord>) -> ListSnapshot {
        let records = Arc::new(records);
        self.tx.send_modify(|snapshot| {
            snapshot.version += 1;
            snapshot.records = records;
        });
        self.current()
    }
}
