//! Deferred order-confirmation schedule.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use rxstock_core::OrderId;

/// Pending confirmations keyed by order id.
///
/// Each entry is a wall-clock deadline after which the order should move
/// `Pending` → `Confirmed`, unless the entry was cancelled first. Keying by
/// order id is what makes the schedule cancellable: an external status
/// change removes the entry before it can fire.
#[derive(Debug, Default)]
pub struct ConfirmationScheduler {
    pending: Mutex<HashMap<OrderId, DateTime<Utc>>>,
}

impl ConfirmationScheduler {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Schedule (or reschedule) a confirmation for `order_id` at `due_at`.
    pub fn schedule(&self, order_id: OrderId, due_at: DateTime<Utc>) {
        let mut pending = self.pending.lock().unwrap();
        pending.insert(order_id, due_at);
    }

    /// Cancel a scheduled confirmation. Returns whether one was pending.
    pub fn cancel(&self, order_id: OrderId) -> bool {
        let mut pending = self.pending.lock().unwrap();
        pending.remove(&order_id).is_some()
    }

    /// Remove and return every entry due at or before `now`, oldest first.
    pub fn take_due(&self, now: DateTime<Utc>) -> Vec<OrderId> {
        let mut pending = self.pending.lock().unwrap();

        let mut due: Vec<(OrderId, DateTime<Utc>)> = pending
            .iter()
            .filter(|(_, due_at)| **due_at <= now)
            .map(|(id, due_at)| (*id, *due_at))
            .collect();
        due.sort_by_key(|(_, due_at)| *due_at);

        for (id, _) in &due {
            pending.remove(id);
        }
        due.into_iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Next deadline across all pending entries, if any.
    pub fn next_due_at(&self) -> Option<DateTime<Utc>> {
        self.pending.lock().unwrap().values().min().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn take_due_returns_only_elapsed_entries() {
        let scheduler = ConfirmationScheduler::new();
        let now = Utc::now();

        let early = OrderId::new();
        let late = OrderId::new();
        scheduler.schedule(early, now - Duration::seconds(1));
        scheduler.schedule(late, now + Duration::seconds(60));

        let due = scheduler.take_due(now);
        assert_eq!(due, vec![early]);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn take_due_drains_oldest_first() {
        let scheduler = ConfirmationScheduler::new();
        let now = Utc::now();

        let second = OrderId::new();
        let first = OrderId::new();
        scheduler.schedule(second, now - Duration::seconds(1));
        scheduler.schedule(first, now - Duration::seconds(5));

        assert_eq!(scheduler.take_due(now), vec![first, second]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn cancel_removes_pending_entry() {
        let scheduler = ConfirmationScheduler::new();
        let now = Utc::now();
        let id = OrderId::new();

        scheduler.schedule(id, now);
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.take_due(now + Duration::seconds(10)).is_empty());
    }

    #[test]
    fn reschedule_overwrites_deadline() {
        let scheduler = ConfirmationScheduler::new();
        let now = Utc::now();
        let id = OrderId::new();

        scheduler.schedule(id, now + Duration::seconds(60));
        scheduler.schedule(id, now - Duration::seconds(1));

        assert_eq!(scheduler.take_due(now), vec![id]);
    }

    #[test]
    fn next_due_at_reports_earliest_deadline() {
        let scheduler = ConfirmationScheduler::new();
        assert!(scheduler.next_due_at().is_none());

        let now = Utc::now();
        scheduler.schedule(OrderId::new(), now + Duration::seconds(30));
        scheduler.schedule(OrderId::new(), now + Duration::seconds(5));

        assert_eq!(scheduler.next_due_at(), Some(now + Duration::seconds(5)));
    }
}
