use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gravity_core::{step, uniform_random, ForceField, SimulationConfig, UniformParams};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bodies(count: usize) -> Vec<gravity_core::Body> {
    let mut rng = StdRng::seed_from_u64(0);
    let params = UniformParams {
        count,
        velocity_range: (0.0, 0.0),
        mass_range: (1.0, 100.0),
        width: 1200.0,
        height: 750.0,
    };
    uniform_random(&params, &mut rng).expect("valid benchmark parameters")
}

fn bench_force_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_field");
    group.sample_size(20);

    for count in [100, 500, 1500] {
        let serial = ForceField::default();
        let parallel = ForceField {
            parallel_threshold: 0,
            ..serial
        };
        let serial = ForceField {
            parallel_threshold: usize::MAX,
            ..serial
        };

        group.throughput(Throughput::Elements(count as u64));

        let mut set = bodies(count);
        group.bench_with_input(BenchmarkId::new("pairs", count), &count, |b, _| {
            b.iter(|| serial.compute(black_box(&mut set)));
        });

        let mut set = bodies(count);
        group.bench_with_input(BenchmarkId::new("rows", count), &count, |b, _| {
            b.iter(|| parallel.compute(black_box(&mut set)));
        });
    }

    group.finish();
}

fn bench_full_step(c: &mut Criterion) {
    let config = SimulationConfig::default();
    let mut set = bodies(1500);
    c.bench_function("step_1500", |b| {
        b.iter(|| step(black_box(&mut set), 0.016, &config, false));
    });
}

criterion_group!(benches, bench_force_paths, bench_full_step);
criterion_main!(benches);
