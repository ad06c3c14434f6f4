//! Benchmarks for section grid building and mesh accumulation.
//!
//! Run with: cargo bench -p mesh-from-sections
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-from-sections -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-from-sections -- --baseline main

#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_from_sections::{
    CurveSection, GridParams, MeshParams, Rebase, build_grid, build_mesh, quad_faces,
};
use section_curves::{
    BezierPoint, CompositeCurve, IntersectParams, PlacedCurve, Point3, Spline, Vector3, intersect,
};

// =============================================================================
// Test Section Generation
// =============================================================================

fn straight(from: Point3<f64>, to: Point3<f64>, offset: Vector3<f64>) -> PlacedCurve {
    let spline = Spline::polyline(&[from, to]);
    PlacedCurve::new(CompositeCurve::new(spline.segments()).unwrap(), offset)
}

/// A section with a curved two-segment top over a unit-wide base.
fn create_section(offset: Vector3<f64>) -> CurveSection<PlacedCurve> {
    let top = CompositeCurve::from_bezier_points(&[
        BezierPoint::new(
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-0.2, 0.8, 0.0),
            Point3::new(0.2, 1.4, 0.0),
        ),
        BezierPoint::new(
            Point3::new(0.5, 1.3, 0.1),
            Point3::new(0.3, 1.3, 0.1),
            Point3::new(0.7, 1.3, 0.1),
        ),
        BezierPoint::new(
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.8, 1.4, 0.0),
            Point3::new(1.2, 0.8, 0.0),
        ),
    ])
    .unwrap();

    CurveSection::new(
        straight(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0), offset),
        straight(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0), offset),
        PlacedCurve::new(top, offset),
        straight(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), offset),
    )
}

fn create_sections(count: usize) -> Vec<CurveSection<PlacedCurve>> {
    (0..count)
        .map(|i| create_section(Vector3::new(i as f64, 0.0, 0.0)))
        .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_intersect(c: &mut Criterion) {
    let section = create_section(Vector3::zeros());
    let params = IntersectParams::default();

    c.bench_function("intersect_left_top", |b| {
        b.iter(|| intersect(black_box(&section.left), black_box(&section.top), &params));
    });
}

fn bench_rebase(c: &mut Criterion) {
    let points: Vec<_> = (0..225)
        .map(|i| Point3::new(0.3, f64::from(i) / 224.0, 0.0))
        .collect();
    let rebase = Rebase::new(
        Point3::new(0.3, 0.0, 0.0),
        Point3::new(0.3, 1.0, 0.0),
        Point3::new(0.31, 0.0, 0.0),
        Point3::new(0.35, 1.2, 0.05),
    )
    .unwrap();

    c.bench_function("rebase_225_points", |b| {
        b.iter(|| rebase.apply_all(black_box(&points)));
    });
}

fn bench_build_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_grid");
    let section = create_section(Vector3::zeros());

    for resolution in [5, 15, 50] {
        let params = GridParams::default().with_resolution(resolution);
        group.throughput(Throughput::Elements((resolution * resolution) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            &params,
            |b, params| {
                b.iter(|| build_grid(black_box(&section), params));
            },
        );
    }

    group.finish();
}

fn bench_build_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_mesh");
    group.sample_size(20);

    for count in [4, 32] {
        let sections = create_sections(count);
        group.throughput(Throughput::Elements(count as u64));

        for parallel in [false, true] {
            let params = MeshParams::default().with_parallel(parallel);
            let name = if parallel { "parallel" } else { "serial" };
            group.bench_with_input(BenchmarkId::new(name, count), &params, |b, params| {
                b.iter(|| build_mesh(black_box(&sections), params));
            });
        }
    }

    group.finish();
}

fn bench_quad_faces(c: &mut Criterion) {
    c.bench_function("quad_faces_15x15", |b| {
        b.iter(|| quad_faces(black_box(225), black_box(15)));
    });
}

criterion_group!(
    benches,
    bench_intersect,
    bench_rebase,
    bench_build_grid,
    bench_build_mesh,
    bench_quad_faces,
);
criterion_main!(benches);
