use criterion::{criterion_group, criterion_main, Criterion};
use fuelroute_lib::{
    find_shortest_path, plan_route, AdjacencyMap, FuelParameters, FuelStock, Graph, RouteRequest,
};
use once_cell::sync::Lazy;
use std::hint::black_box;

const SIDE: usize = 24;

fn cell(row: usize, col: usize) -> String {
    format!("r{row:02}c{col:02}")
}

/// Square grid with bidirectional edges whose weights vary by position.
fn grid_adjacency() -> AdjacencyMap {
    let mut map = AdjacencyMap::new();
    for row in 0..SIDE {
        for col in 0..SIDE {
            let weight = 1.0 + ((row * 7 + col * 3) % 5) as f64;
            let entry = map.entry(cell(row, col)).or_default();
            if col + 1 < SIDE {
                entry.insert(cell(row, col + 1), weight);
            }
            if row + 1 < SIDE {
                entry.insert(cell(row + 1, col), weight);
            }
            if col > 0 {
                entry.insert(cell(row, col - 1), weight);
            }
            if row > 0 {
                entry.insert(cell(row - 1, col), weight);
            }
        }
    }
    map
}

static GRID: Lazy<Graph> =
    Lazy::new(|| Graph::from_adjacency(&grid_adjacency()).expect("grid is valid"));

static STOCK: Lazy<FuelStock> = Lazy::new(|| {
    (0..SIDE)
        .step_by(4)
        .flat_map(|row| (0..SIDE).step_by(4).map(move |col| (cell(row, col), 20.0)))
        .collect()
});

static UNCONSTRAINED_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::new(cell(0, 0), cell(SIDE - 1, SIDE - 1)));

static REFUELLING_REQUEST: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::new(cell(0, 0), cell(SIDE - 1, SIDE - 1))
        .with_fuel(FuelParameters::new(20.0, 1.0))
        .with_stock(STOCK.clone())
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRID;
    let start = graph.node_index(&cell(0, 0)).expect("corner exists");
    let goal = graph
        .node_index(&cell(SIDE - 1, SIDE - 1))
        .expect("corner exists");

    c.bench_function("dijkstra_grid_corner_to_corner", |b| {
        b.iter(|| black_box(find_shortest_path(graph, start, goal).distance));
    });

    c.bench_function("plan_route_unconstrained", |b| {
        let request = &*UNCONSTRAINED_REQUEST;
        b.iter(|| {
            let outcome = plan_route(graph, request).expect("valid request");
            black_box(outcome.stop_count())
        });
    });

    c.bench_function("plan_route_refuelling", |b| {
        let request = &*REFUELLING_REQUEST;
        b.iter(|| {
            let outcome = plan_route(graph, request).expect("valid request");
            black_box(outcome.stop_count())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
