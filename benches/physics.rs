//! Benchmarks for springsim integrators.

use criterion::{criterion_group, criterion_main, Criterion};
use springsim::*;

fn bench_schemes(c: &mut Criterion) {
    let config: SpringConfig<f64> = SpringConfig::demo();
    for scheme in Scheme::ALL {
        let name = format!("spring_{}_1000_steps", scheme.name().replace(' ', "_"));
        c.bench_function(&name, |b| {
            b.iter(|| {
                let mut spring = Spring::with_scheme(&config, scheme).unwrap();
                for _ in 0..1000 {
                    spring.update(-1.0).unwrap();
                }
                spring.current_state()
            });
        });
    }
}

fn bench_implicit_refactor(c: &mut Criterion) {
    let config: SpringConfig<f64> = SpringConfig::demo();
    c.bench_function("implicit_euler_refactor_every_step_1000", |b| {
        b.iter(|| {
            let mut spring = Spring::with_scheme(&config, Scheme::ImplicitEuler).unwrap();
            for i in 0..1000 {
                spring.set_stiffness(200.0 + (i % 10) as f64);
                spring.update(-1.0).unwrap();
            }
            spring.current_state()
        });
    });
}

fn bench_bank_frames(c: &mut Criterion) {
    c.bench_function("bank_60_frames", |b| {
        b.iter(|| {
            let mut bank: SpringBank<f32> = SpringBank::new(&SpringConfig::demo()).unwrap();
            for _ in 0..60 {
                bank.update(1.0 / 60.0).unwrap();
            }
            bank.positions()
        });
    });
}

criterion_group!(benches, bench_schemes, bench_implicit_refactor, bench_bank_frames);
criterion_main!(benches);
