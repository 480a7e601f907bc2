use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use ribbit_rig_core::{AnimationContext, Control, RigConfig, SkeletonDesc};
use ribbit_test_fixtures::rigs;

fn frog() -> AnimationContext {
    let desc: SkeletonDesc = rigs::load("frog").expect("frog fixture");
    let mut ctx = AnimationContext::new(&desc, RigConfig::default()).expect("frog rig");
    ctx.start();
    ctx
}

fn advance_benchmark(c: &mut Criterion) {
    let mut idle = frog();
    c.bench_function("advance_idle", |b| {
        b.iter(|| {
            idle.advance(black_box(1.0 / 60.0));
            black_box(idle.bone_matrices().as_slice()[0]);
        })
    });

    let mut walking = frog();
    walking.input_mut().press(Control::MoveForward);
    walking.input_mut().press(Control::TurnLeft);
    c.bench_function("advance_walking", |b| {
        b.iter(|| {
            walking.advance(black_box(1.0 / 60.0));
            black_box(walking.bone_matrices().as_slice()[0]);
        })
    });

    let ctx = frog();
    c.bench_function("bone_floats", |b| {
        b.iter(|| black_box(ctx.bone_matrices().to_cols_floats()))
    });
}

criterion_group!(benches, advance_benchmark);
criterion_main!(benches);
