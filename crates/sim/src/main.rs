//! Simulation entry point: wires the registry, bus, and subscribers, then
//! feeds a generated event sequence through `publish`.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;

use vendsim_core::MachineId;
use vendsim_events::EventBus;
use vendsim_machines::{
    Machine, MachineEvent, MachineEventKind, MachineRegistry, RefillSubscriber, SaleSubscriber,
    StockAlertSubscriber,
};

mod generator;

use generator::EventGenerator;

/// Vending machine stock simulation.
#[derive(Parser)]
#[command(name = "vendsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of machines to simulate.
    #[arg(long, default_value_t = 3)]
    machines: usize,

    /// Initial stock level per machine.
    #[arg(long, default_value_t = 5)]
    initial_stock: u32,

    /// Number of random events to publish.
    #[arg(long, default_value_t = 9)]
    events: usize,

    /// RNG seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    vendsim_observability::init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.machines > 0, "at least one machine is required");

    // Machines get zero-padded ordinal identities: "001", "002", ...
    let machine_ids: Vec<MachineId> = (1..=cli.machines)
        .map(|n| MachineId::from(format!("{n:03}")))
        .collect();

    let mut registry = MachineRegistry::new();
    for id in &machine_ids {
        registry.register(Machine::new(id.clone(), cli.initial_stock))?;
    }
    let registry = Arc::new(Mutex::new(registry));

    let bus: Arc<EventBus<MachineEvent>> = Arc::new(EventBus::new());
    bus.subscribe(
        MachineEventKind::Sold,
        Arc::new(SaleSubscriber::new(registry.clone(), bus.clone())),
    );
    bus.subscribe(
        MachineEventKind::Refilled,
        Arc::new(RefillSubscriber::new(registry.clone(), bus.clone())),
    );
    let alerts = Arc::new(StockAlertSubscriber);
    bus.subscribe(MachineEventKind::StockLow, alerts.clone());
    bus.subscribe(MachineEventKind::StockRecovered, alerts);

    tracing::info!(
        machines = cli.machines,
        initial_stock = cli.initial_stock,
        events = cli.events,
        seed = cli.seed,
        "simulation starting"
    );

    let mut generator = EventGenerator::new(machine_ids, cli.seed);
    for _ in 0..cli.events {
        bus.publish(generator.next_event());
    }

    let registry = registry
        .lock()
        .map_err(|_| anyhow::anyhow!("machine registry lock poisoned"))?;
    let mut machines: Vec<_> = registry.iter().collect();
    machines.sort_by(|a, b| a.id().as_str().cmp(b.id().as_str()));
    for machine in machines {
        tracing::info!(machine_id = %machine.id(), stock = machine.stock(), "final stock");
    }

    Ok(())
}
