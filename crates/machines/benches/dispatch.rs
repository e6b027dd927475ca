use criterion::{Criterion, Throughput, criterion_group, criterion_main};

use std::sync::{Arc, Mutex};

use chrono::Utc;

use vendsim_core::MachineId;
use vendsim_events::EventBus;
use vendsim_machines::{
    Machine, MachineEvent, MachineEventKind, MachineRefilled, MachineRegistry, MachineSold,
    RefillSubscriber, SaleSubscriber, StockAlertSubscriber,
};

fn wire(initial_stock: u32) -> Arc<EventBus<MachineEvent>> {
    let mut registry = MachineRegistry::new();
    registry
        .register(Machine::new(MachineId::from("001"), initial_stock))
        .unwrap();
    let registry = Arc::new(Mutex::new(registry));

    let bus = Arc::new(EventBus::new());
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

    bus
}

fn sold(quantity: u32) -> MachineEvent {
    MachineEvent::Sold(MachineSold {
        machine_id: MachineId::from("001"),
        sold: quantity,
        occurred_at: Utc::now(),
    })
}

fn refilled(quantity: u32) -> MachineEvent {
    MachineEvent::Refilled(MachineRefilled {
        machine_id: MachineId::from("001"),
        refilled: quantity,
        occurred_at: Utc::now(),
    })
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    // Stock stays far above the threshold: no derived alert is published.
    group.throughput(Throughput::Elements(1));
    group.bench_function("sale_without_alert", |b| {
        let bus = wire(u32::MAX);
        b.iter(|| bus.publish(sold(1)));
    });

    // Stock oscillates around the threshold: every iteration publishes a
    // sale and a refill, each of which chains into a derived alert.
    group.throughput(Throughput::Elements(2));
    group.bench_function("sale_refill_alert_cycle", |b| {
        let bus = wire(3);
        b.iter(|| {
            bus.publish(sold(1));
            bus.publish(refilled(1));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
