//! Machine event model.
//!
//! A closed set of event variants routed by [`MachineEventKind`]. Sale and
//! refill events come from the outside (the generator); the two stock
//! alerts are derived by the mutating subscribers and terminate the chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendsim_core::MachineId;
use vendsim_events::Event;

/// Routing key for machine events.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineEventKind {
    Sold,
    Refilled,
    StockLow,
    StockRecovered,
}

/// Event: a machine sold `sold` units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSold {
    pub machine_id: MachineId,
    pub sold: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a machine was refilled with `refilled` units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineRefilled {
    pub machine_id: MachineId,
    pub refilled: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a sale dropped a machine's stock below the threshold.
///
/// `remaining` may be negative (oversized sales are applied in full).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLow {
    pub machine_id: MachineId,
    pub remaining: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a refill brought a machine's stock back to the threshold or above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecovered {
    pub machine_id: MachineId,
    pub remaining: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Machine events, as a tagged variant over the four kinds.
///
/// Subscribers match on the variant they are registered for; the match is
/// exhaustive, so routing mistakes surface as a logged warning rather than
/// an unchecked cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineEvent {
    Sold(MachineSold),
    Refilled(MachineRefilled),
    StockLow(StockLow),
    StockRecovered(StockRecovered),
}

impl MachineEvent {
    /// Identity of the machine this event targets.
    pub fn machine_id(&self) -> &MachineId {
        match self {
            MachineEvent::Sold(e) => &e.machine_id,
            MachineEvent::Refilled(e) => &e.machine_id,
            MachineEvent::StockLow(e) => &e.machine_id,
            MachineEvent::StockRecovered(e) => &e.machine_id,
        }
    }
}

impl Event for MachineEvent {
    type Kind = MachineEventKind;

    fn kind(&self) -> MachineEventKind {
        match self {
            MachineEvent::Sold(_) => MachineEventKind::Sold,
            MachineEvent::Refilled(_) => MachineEventKind::Refilled,
            MachineEvent::StockLow(_) => MachineEventKind::StockLow,
            MachineEvent::StockRecovered(_) => MachineEventKind::StockRecovered,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            MachineEvent::Sold(_) => "machine.sold",
            MachineEvent::Refilled(_) => "machine.refilled",
            MachineEvent::StockLow(_) => "machine.stock_low",
            MachineEvent::StockRecovered(_) => "machine.stock_recovered",
        }
    }
}
