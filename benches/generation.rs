//! Performance measurement for full map generation at varying grid sizes

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use worldweave::{GenerateOptions, TerrainSliders, WorldSeed, generate};

fn scenario_seed(edge: usize) -> Option<WorldSeed> {
    let raw = format!(
        r#"{{
            "name": "bench",
            "size": {{ "width": {edge}, "height": {edge} }},
            "biome": "temperate",
            "pois": [
                {{ "id": "v1", "type": "village", "name": "A",
                   "position": {{ "x": 2, "y": 2 }} }},
                {{ "id": "v2", "type": "village", "name": "B",
                   "position": {{ "x": {far}, "y": {far} }} }}
            ],
            "connections": [ {{ "from": "v1", "to": "v2", "style": "dirt" }} ]
        }}"#,
        far = edge - 3
    );
    serde_json::from_str(&raw).ok()
}

/// Measures end-to-end generation cost as the map edge grows
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for edge in &[16usize, 32, 48] {
        let Some(seed) = scenario_seed(*edge) else {
            group.finish();
            return;
        };

        group.bench_with_input(BenchmarkId::from_parameter(edge), edge, |b, _| {
            b.iter(|| {
                generate(
                    black_box(&seed),
                    12345,
                    &TerrainSliders::default(),
                    GenerateOptions::default(),
                )
            });
        });
    }

    group.finish();
}

/// Measures the solve alone on an empty seed, no settlements or roads
fn bench_bare_terrain(c: &mut Criterion) {
    let raw = r#"{ "name": "bare", "size": { "width": 32, "height": 32 }, "biome": "temperate" }"#;
    let Ok(seed) = serde_json::from_str::<WorldSeed>(raw) else {
        return;
    };

    c.bench_function("bare_terrain_32", |b| {
        b.iter(|| {
            generate(
                black_box(&seed),
                99,
                &TerrainSliders::default(),
                GenerateOptions::default(),
            )
        });
    });
}

criterion_group!(benches, bench_generate, bench_bare_terrain);
criterion_main!(benches);
