//! Emergency node hot-path benchmarks.
//!
//! Measures uncontended raise/solve pairs, duplicate raises, the aggregate
//! query, and raise/solve under contention from several threads.

use criterion::{Criterion, criterion_group, criterion_main};
use emergency_flags::{EmergencyNode, EmergencyState, NUM_CODES};
use std::hint::black_box;
use std::sync::{Arc, Barrier};
use std::thread;

fn bench_raise_solve(c: &mut Criterion) {
    let state = EmergencyState::new();
    let node = EmergencyNode::with_state(&state);

    c.bench_function("raise_solve_pair", |b| {
        b.iter(|| {
            node.raise(black_box(17)).unwrap();
            node.solve(black_box(17)).unwrap();
        });
    });
}

fn bench_duplicate_raise(c: &mut Criterion) {
    let state = EmergencyState::new();
    let node = EmergencyNode::with_state(&state);
    node.raise(5).unwrap();

    c.bench_function("raise_already_raised", |b| {
        b.iter(|| node.raise(black_box(5)).unwrap());
    });
}

fn bench_query(c: &mut Criterion) {
    let state = EmergencyState::new();
    let node = EmergencyNode::with_state(&state);
    node.raise(1).unwrap();

    c.bench_function("is_emergency_state", |b| {
        b.iter(|| black_box(node.is_emergency_state()));
    });
}

fn bench_contended_nodes(c: &mut Criterion) {
    const THREADS: usize = 4;
    let state: &'static EmergencyState = Box::leak(Box::new(EmergencyState::new()));

    c.bench_function("contended_4_nodes_raise_solve", |b| {
        b.iter(|| {
            let barrier = Arc::new(Barrier::new(THREADS));
            let handles: Vec<_> = (0..THREADS)
                .map(|t| {
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        let node = EmergencyNode::with_state(state);
                        barrier.wait();
                        for code in 0..NUM_CODES {
                            node.raise(code).unwrap();
                            node.solve((code + t) % NUM_CODES).unwrap();
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });
}

criterion_group!(
    benches,
    bench_raise_solve,
    bench_duplicate_raise,
    bench_query,
    bench_contended_nodes
);
criterion_main!(benches);
