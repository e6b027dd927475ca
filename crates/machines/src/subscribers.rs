//! Stock subscribers: the dispatch targets for machine events.
//!
//! The sale and refill subscribers mutate the registry and may publish a
//! derived stock alert back through the bus before returning; the alert
//! subscriber is a terminal observer that only logs. Alerts are
//! edge-triggered: they fire on the transition that crosses
//! [`LOW_STOCK_THRESHOLD`], not on every event while already past it.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use vendsim_events::{Event, EventBus, Subscriber};

use crate::event::{MachineEvent, MachineRefilled, MachineSold, StockLow, StockRecovered};
use crate::machine::{LOW_STOCK_THRESHOLD, MachineRegistry};

/// Applies sales to machine stock and raises low-stock alerts.
///
/// # Panics
///
/// Panics if a sale references a machine that was never registered: the bus
/// only routes events for machines created at bootstrap, so a miss is a
/// wiring bug with no defined behavior to fall back on.
pub struct SaleSubscriber {
    registry: Arc<Mutex<MachineRegistry>>,
    bus: Arc<EventBus<MachineEvent>>,
}

impl SaleSubscriber {
    pub fn new(registry: Arc<Mutex<MachineRegistry>>, bus: Arc<EventBus<MachineEvent>>) -> Self {
        Self { registry, bus }
    }

    fn on_sale(&self, event: &MachineSold) {
        let stock = {
            let Ok(mut registry) = self.registry.lock() else {
                return;
            };
            let machine = registry
                .lookup_mut(&event.machine_id)
                .unwrap_or_else(|err| panic!("sale routed to unknown machine: {err}"));

            // Snapshot before mutating: the alert is only eligible when this
            // sale is the one that crosses the threshold.
            let was_above = machine.stock() >= LOW_STOCK_THRESHOLD;
            let stock = machine.deduct(event.sold);

            tracing::info!(
                event_type = "machine.sold",
                machine_id = %event.machine_id,
                sold = event.sold,
                stock,
                "machine sale handled"
            );

            if !(stock < LOW_STOCK_THRESHOLD && was_above) {
                return;
            }
            stock
        };

        // Registry lock released: the nested publish runs unlocked.
        self.bus.publish(MachineEvent::StockLow(StockLow {
            machine_id: event.machine_id.clone(),
            remaining: stock,
            occurred_at: Utc::now(),
        }));
    }
}

impl Subscriber<MachineEvent> for SaleSubscriber {
    fn handle(&self, event: &MachineEvent) {
        match event {
            MachineEvent::Sold(e) => self.on_sale(e),
            other => {
                tracing::warn!(
                    event_type = other.event_type(),
                    "sale subscriber received unrelated event"
                );
            }
        }
    }
}

/// Applies refills to machine stock and raises recovery alerts.
///
/// # Panics
///
/// Panics if a refill references a machine that was never registered
/// (wiring bug, same policy as [`SaleSubscriber`]).
pub struct RefillSubscriber {
    registry: Arc<Mutex<MachineRegistry>>,
    bus: Arc<EventBus<MachineEvent>>,
}

impl RefillSubscriber {
    pub fn new(registry: Arc<Mutex<MachineRegistry>>, bus: Arc<EventBus<MachineEvent>>) -> Self {
        Self { registry, bus }
    }

    fn on_refill(&self, event: &MachineRefilled) {
        let stock = {
            let Ok(mut registry) = self.registry.lock() else {
                return;
            };
            let machine = registry
                .lookup_mut(&event.machine_id)
                .unwrap_or_else(|err| panic!("refill routed to unknown machine: {err}"));

            let was_below = machine.stock() < LOW_STOCK_THRESHOLD;
            let stock = machine.replenish(event.refilled);

            tracing::info!(
                event_type = "machine.refilled",
                machine_id = %event.machine_id,
                refilled = event.refilled,
                stock,
                "machine refill handled"
            );

            if !(stock >= LOW_STOCK_THRESHOLD && was_below) {
                return;
            }
            stock
        };

        self.bus.publish(MachineEvent::StockRecovered(StockRecovered {
            machine_id: event.machine_id.clone(),
            remaining: stock,
            occurred_at: Utc::now(),
        }));
    }
}

impl Subscriber<MachineEvent> for RefillSubscriber {
    fn handle(&self, event: &MachineEvent) {
        match event {
            MachineEvent::Refilled(e) => self.on_refill(e),
            other => {
                tracing::warn!(
                    event_type = other.event_type(),
                    "refill subscriber received unrelated event"
                );
            }
        }
    }
}

/// Terminal observer for stock alerts.
///
/// Logs the alert and stops: no registry mutation, no re-publish. This is
/// the termination point of the sold→stock_low and refilled→stock_recovered
/// chains.
pub struct StockAlertSubscriber;

impl Subscriber<MachineEvent> for StockAlertSubscriber {
    fn handle(&self, event: &MachineEvent) {
        match event {
            MachineEvent::StockLow(e) => {
                tracing::warn!(
                    event_type = "machine.stock_low",
                    machine_id = %e.machine_id,
                    remaining = e.remaining,
                    "stock below threshold"
                );
            }
            MachineEvent::StockRecovered(e) => {
                tracing::info!(
                    event_type = "machine.stock_recovered",
                    machine_id = %e.machine_id,
                    remaining = e.remaining,
                    "stock level recovered"
                );
            }
            other => {
                tracing::warn!(
                    event_type = other.event_type(),
                    "stock alert subscriber received unrelated event"
                );
            }
        }
    }
}
