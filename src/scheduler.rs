//! Speed-based turn scheduler
//!
//! Every AI-bearing entity carries an accumulated duration counter. The
//! entity with the smallest counter acts next; ties go to the earliest
//! registration. Actions charge their own cost, the scheduler never charges
//! anything implicitly.
//!
//! Misuse of the contract - advancing while locked, advancing an empty
//! queue, charging an unregistered entity - is a programming error and
//! panics rather than limping on.

use crate::core::types::{EntityId, TurnCost, TurnCounter};

#[derive(Debug, Clone)]
struct Entry {
    id: EntityId,
    counter: TurnCounter,
    /// Registration order, the tie-breaker
    seq: u64,
    /// Set when the entity passed without charging; deferred entries wait
    /// until the next cycle (any charge or unlock) before acting again
    deferred: bool,
}

/// Orders whose turn comes next and tracks accumulated time
#[derive(Debug, Default)]
pub struct TurnScheduler {
    entries: Vec<Entry>,
    next_seq: u64,
    locked: bool,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity. Its counter starts at zero.
    pub fn add(&mut self, id: EntityId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            id,
            counter: 0,
            seq,
            deferred: false,
        });
    }

    /// Drop an entity from scheduling (death or AI removal).
    pub fn remove(&mut self, id: EntityId) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Accumulated counter for an entity, if registered. Test hook and HUD
    /// fodder; gameplay never branches on it.
    pub fn counter(&self, id: EntityId) -> Option<TurnCounter> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.counter)
    }

    /// Select the next entity to act: minimum counter, ties to the earliest
    /// registration. Entities that deferred this cycle are skipped until
    /// every entry has deferred, which starts a fresh cycle.
    ///
    /// # Panics
    /// When called while locked or with no scheduled entities - both break
    /// the run-loop contract.
    pub fn advance(&mut self) -> EntityId {
        assert!(!self.locked, "scheduler advanced while locked");
        assert!(!self.entries.is_empty(), "scheduler advanced with no entities");

        if self.entries.iter().all(|e| e.deferred) {
            self.clear_deferrals();
        }

        self.entries
            .iter()
            .filter(|e| !e.deferred)
            .min_by_key(|e| (e.counter, e.seq))
            .map(|e| e.id)
            .expect("non-deferred entry exists")
    }

    /// Add an action's cost to an entity's counter.
    ///
    /// Called by whichever action the entity took, never automatically.
    /// Charging also ends the current deferral cycle: time moved, so passed
    /// entities get reconsidered.
    ///
    /// # Panics
    /// When the entity is not registered.
    pub fn charge(&mut self, id: EntityId, cost: TurnCost) {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .unwrap_or_else(|| panic!("charge on unregistered entity {id:?}"));
        entry.counter += TurnCounter::from(cost);
        self.clear_deferrals();
    }

    /// Mark an entity as having passed without charging. It yields to every
    /// other scheduled entity until the cycle ends.
    pub fn defer(&mut self, id: EntityId) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.deferred = true;
        }
    }

    /// Suspend the run loop while a human-controlled entity waits for input.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Resume after the locked entity's turn has been charged.
    pub fn unlock(&mut self) {
        self.locked = false;
        self.clear_deferrals();
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn clear_deferrals(&mut self) {
        for entry in &mut self.entries {
            entry.deferred = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_by_counter_then_registration() {
        let mut sched = TurnScheduler::new();
        let a = EntityId::new();
        let b = EntityId::new();
        let c = EntityId::new();

        sched.add(a);
        sched.add(b);
        sched.add(c);
        sched.charge(b, 5);

        // A and C tie at 0; A registered first
        assert_eq!(sched.advance(), a);
        sched.charge(a, 10);
        assert_eq!(sched.advance(), c);
        sched.charge(c, 10);
        assert_eq!(sched.advance(), b);
    }

    #[test]
    fn test_charge_accumulates() {
        let mut sched = TurnScheduler::new();
        let a = EntityId::new();
        sched.add(a);
        sched.charge(a, 10);
        sched.charge(a, 7);
        assert_eq!(sched.counter(a), Some(17));
    }

    #[test]
    fn test_remove_drops_entity() {
        let mut sched = TurnScheduler::new();
        let a = EntityId::new();
        let b = EntityId::new();
        sched.add(a);
        sched.add(b);
        sched.remove(a);

        assert!(!sched.contains(a));
        assert_eq!(sched.advance(), b);
    }

    #[test]
    fn test_deferred_entity_yields_until_next_cycle() {
        let mut sched = TurnScheduler::new();
        let stuck = EntityId::new();
        let other = EntityId::new();
        sched.add(stuck);
        sched.add(other);
        sched.charge(other, 20);

        assert_eq!(sched.advance(), stuck);
        sched.defer(stuck);
        // Despite the smaller counter, the deferred entity yields
        assert_eq!(sched.advance(), other);
        sched.charge(other, 20);
        // The charge ended the cycle; the passer is reconsidered
        assert_eq!(sched.advance(), stuck);
    }

    #[test]
    fn test_all_deferred_starts_fresh_cycle() {
        let mut sched = TurnScheduler::new();
        let a = EntityId::new();
        let b = EntityId::new();
        sched.add(a);
        sched.add(b);

        assert_eq!(sched.advance(), a);
        sched.defer(a);
        assert_eq!(sched.advance(), b);
        sched.defer(b);
        // Everyone deferred: new cycle, back to the minimum
        assert_eq!(sched.advance(), a);
    }

    #[test]
    #[should_panic(expected = "advanced while locked")]
    fn test_advance_while_locked_panics() {
        let mut sched = TurnScheduler::new();
        sched.add(EntityId::new());
        sched.lock();
        sched.advance();
    }

    #[test]
    #[should_panic(expected = "unregistered entity")]
    fn test_charge_unregistered_panics() {
        let mut sched = TurnScheduler::new();
        sched.charge(EntityId::new(), 10);
    }

    #[test]
    #[should_panic(expected = "no entities")]
    fn test_advance_empty_panics() {
        TurnScheduler::new().advance();
    }

    #[test]
    fn test_unlock_resumes() {
        let mut sched = TurnScheduler::new();
        let a = EntityId::new();
        sched.add(a);
        sched.lock();
        assert!(sched.is_locked());
        sched.unlock();
        assert_eq!(sched.advance(), a);
    }
}
