//! Machines and the keyed machine registry.

use std::collections::HashMap;

use vendsim_core::{DomainError, DomainResult, MachineId};

/// Stock level below which a machine counts as low.
pub const LOW_STOCK_THRESHOLD: i64 = 3;

/// A vending machine: immutable identity plus a mutable stock level.
///
/// Stock may go negative: an oversized sale is applied in full, with no
/// floor clamp and no insufficient-stock error. Mutation is crate-private —
/// only the sale/refill subscribers change stock, never the bus or outside
/// callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    id: MachineId,
    stock: i64,
}

impl Machine {
    pub fn new(id: MachineId, initial_stock: u32) -> Self {
        Self {
            id,
            stock: i64::from(initial_stock),
        }
    }

    pub fn id(&self) -> &MachineId {
        &self.id
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn is_low(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    /// Applies a sale, returning the new stock level.
    pub(crate) fn deduct(&mut self, quantity: u32) -> i64 {
        self.stock -= i64::from(quantity);
        self.stock
    }

    /// Applies a refill, returning the new stock level.
    pub(crate) fn replenish(&mut self, quantity: u32) -> i64 {
        self.stock += i64::from(quantity);
        self.stock
    }
}

/// Keyed store of machines: one instance per identity.
///
/// The registry is a passive store (add on create, read/update by
/// identity). It never publishes events and never changes stock on its own;
/// since events are processed one at a time, this gives each machine a
/// single writer per event.
#[derive(Debug, Default)]
pub struct MachineRegistry {
    machines: HashMap<MachineId, Machine>,
}

impl MachineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a machine, enforcing one instance per identity.
    pub fn register(&mut self, machine: Machine) -> DomainResult<()> {
        if self.machines.contains_key(machine.id()) {
            return Err(DomainError::AlreadyRegistered(machine.id().clone()));
        }
        self.machines.insert(machine.id().clone(), machine);
        Ok(())
    }

    /// Looks up a machine by identity.
    ///
    /// `NotFound` here means the caller referenced an identity that was
    /// never created — a wiring bug, not a recoverable condition.
    pub fn lookup(&self, id: &MachineId) -> DomainResult<&Machine> {
        self.machines
            .get(id)
            .ok_or_else(|| DomainError::NotFound(id.clone()))
    }

    pub(crate) fn lookup_mut(&mut self, id: &MachineId) -> DomainResult<&mut Machine> {
        self.machines
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(id.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Machine> {
        self.machines.values()
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_lookup_returns_machine() {
        let mut registry = MachineRegistry::new();
        registry
            .register(Machine::new(MachineId::from("001"), 5))
            .unwrap();

        let machine = registry.lookup(&MachineId::from("001")).unwrap();
        assert_eq!(machine.stock(), 5);
        assert!(!machine.is_low());
    }

    #[test]
    fn register_rejects_duplicate_identity() {
        let mut registry = MachineRegistry::new();
        registry
            .register(Machine::new(MachineId::from("001"), 5))
            .unwrap();

        let err = registry
            .register(Machine::new(MachineId::from("001"), 10))
            .unwrap_err();
        assert_eq!(err, DomainError::AlreadyRegistered(MachineId::from("001")));

        // The first registration is untouched.
        assert_eq!(registry.lookup(&MachineId::from("001")).unwrap().stock(), 5);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_unknown_identity_is_not_found() {
        let registry = MachineRegistry::new();
        let err = registry.lookup(&MachineId::from("404")).unwrap_err();
        assert_eq!(err, DomainError::NotFound(MachineId::from("404")));
    }

    #[test]
    fn deduct_may_drive_stock_negative() {
        let mut machine = Machine::new(MachineId::from("001"), 5);
        assert_eq!(machine.deduct(9), -4);
        assert_eq!(machine.stock(), -4);
        assert!(machine.is_low());
    }

    #[test]
    fn replenish_raises_stock() {
        let mut machine = Machine::new(MachineId::from("001"), 1);
        assert!(machine.is_low());
        assert_eq!(machine.replenish(4), 5);
        assert!(!machine.is_low());
    }
}
