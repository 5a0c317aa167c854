// Seam between the collection session and whatever records rewards
// (remote ledger, CSV log, test double). The engine itself never persists.

use crate::core::session::CollectionEvent;

pub trait RewardSink {
    fn record_collection(&mut self, event: &CollectionEvent);
}
