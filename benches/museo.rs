use criterion::{Criterion, criterion_group, criterion_main};
use museo::prelude::*;
use std::{hint::black_box, time::Duration};

/// Deterministic spread of points over western Europe.
fn waypoints(n: usize) -> Vec<Waypoint> {
    (0..n)
        .map(|i| {
            let i = i as f64;
            let latitude = 43.0 + (i * 7.31).sin().abs() * 10.0;
            let longitude = -4.0 + (i * 3.17).cos().abs() * 16.0;
            Waypoint::new(format!("m{i}"), latitude, longitude, format!("Museum {i}"))
        })
        .collect()
}

fn sequence(waypoints: &[Waypoint]) {
    let start = Timestamp::from_unix(1_714_554_000);
    let _ = black_box(generate_route(waypoints, Some(start)));
}

fn catalog_lookup(catalog: &Catalog) {
    let coordinate = Coordinate::from((48.8606, 2.3376));
    let _ = black_box(catalog.museums_by_coordinate(&coordinate, Distance::from_kilometers(50.0)));
}

fn criterion_benchmark(c: &mut Criterion) {
    let trip = waypoints(12);
    let tour = waypoints(500);
    let catalog = Catalog::with_museums(
        waypoints(20_000)
            .iter()
            .map(|waypoint| Museum::new(&waypoint.id, &waypoint.name, waypoint.coordinate))
            .collect(),
    );

    let mut group = c.benchmark_group("Planner");

    group.warm_up_time(Duration::from_secs(3));

    group.measurement_time(Duration::from_secs(10));

    group.bench_function("Sequence 12 stops", |b| b.iter(|| sequence(&trip)));

    group.bench_function("Sequence 500 stops", |b| b.iter(|| sequence(&tour)));

    group.bench_function("Museums within 50 km", |b| {
        b.iter(|| catalog_lookup(&catalog))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
