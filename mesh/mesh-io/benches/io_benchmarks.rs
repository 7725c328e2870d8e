//! Benchmarks for mesh-io operations.
//!
//! Run with: cargo bench -p mesh-io
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-io -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-io -- --baseline main

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_io::{load_mesh, save_mesh, save_ply};
use mesh_types::{PlanarMesh, unit_square_grid};
use tempfile::tempdir;

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Grid with irrational-looking coordinates so text output uses full precision.
fn create_grid(n: u32) -> PlanarMesh {
    let mut grid = unit_square_grid(n);
    let scale = std::f64::consts::PI;
    for v in &mut grid.vertices {
        v.x *= scale;
        v.y *= scale;
    }
    grid
}

// =============================================================================
// I/O Benchmarks
// =============================================================================

fn bench_io(c: &mut Criterion) {
    let mut group = c.benchmark_group("IO");

    let temp_dir = tempdir().expect("failed to create temp dir");

    for n in [16, 64] {
        let grid = create_grid(n); // 2n² triangles
        group.throughput(Throughput::Elements(grid.faces.len() as u64));

        let obj_path = temp_dir.path().join(format!("bench_{n}.obj"));
        let ply_path = temp_dir.path().join(format!("bench_{n}.ply"));
        let ascii_path = temp_dir.path().join(format!("bench_{n}_ascii.ply"));

        save_mesh(&grid, &obj_path).expect("failed to save OBJ");
        save_mesh(&grid, &ply_path).expect("failed to save PLY");
        save_ply(&grid, &ascii_path, false).expect("failed to save ASCII PLY");

        // Load benchmarks
        group.bench_with_input(BenchmarkId::new("load_obj", n), &obj_path, |b, path| {
            b.iter(|| load_mesh(black_box(path)));
        });
        group.bench_with_input(BenchmarkId::new("load_ply", n), &ply_path, |b, path| {
            b.iter(|| load_mesh(black_box(path)));
        });
        group.bench_with_input(
            BenchmarkId::new("load_ply_ascii", n),
            &ascii_path,
            |b, path| b.iter(|| load_mesh(black_box(path))),
        );

        // Save benchmarks
        let out_obj = temp_dir.path().join("bench_out.obj");
        let out_ply = temp_dir.path().join("bench_out.ply");

        group.bench_with_input(BenchmarkId::new("save_obj", n), &grid, |b, grid| {
            b.iter(|| save_mesh(black_box(grid), black_box(&out_obj)));
        });
        group.bench_with_input(BenchmarkId::new("save_ply", n), &grid, |b, grid| {
            b.iter(|| save_mesh(black_box(grid), black_box(&out_ply)));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_io);
criterion_main!(benches);
