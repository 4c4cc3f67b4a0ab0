use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use transporter_mc::device::Material;
use transporter_mc::processor::ScatteringEventProcessor;
use transporter_mc::scattering::{CumulativeTable, RateTable, Valley};
use transporter_mc::spectral::EnergyAxisBuilder;
use transporter_mc::trajectory::{RunSettings, SummaryRecorder, TrajectorySimulatorBuilder};

pub fn bench_table_construction(c: &mut Criterion) {
    let info_desk = Material::GaAs.info_desk(300_f64).unwrap();
    let mut group = c.benchmark_group("table_construction");

    for num_points in [100, 1_000, 10_000].iter() {
        let axis = EnergyAxisBuilder::new()
            .with_number_of_points(*num_points)
            .with_energy_range(0_f64..2_f64)
            .build()
            .unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(*num_points),
            num_points,
            |b, _| {
                b.iter(|| {
                    let rates = RateTable::build(black_box(&axis), black_box(&info_desk)).unwrap();
                    CumulativeTable::build(&rates)
                })
            },
        );
    }
}

pub fn bench_scattering_event(c: &mut Criterion) {
    let info_desk = Material::GaAs.info_desk(300_f64).unwrap();
    let axis = EnergyAxisBuilder::new()
        .with_number_of_points(1_000)
        .with_energy_range(0_f64..2_f64)
        .build()
        .unwrap();
    let rates = RateTable::build(&axis, &info_desk).unwrap();
    let table = CumulativeTable::build(&rates);
    let processor = ScatteringEventProcessor::new(&table, &info_desk);
    let mut rng = StdRng::seed_from_u64(0);
    let electron = processor.initialise(Valley::Gamma, 0.3, &mut rng);

    c.bench_function("flight_and_scatter", |b| {
        b.iter(|| {
            let mut electron = electron;
            let tau = processor.sample_flight_time(electron.valley(), &mut rng);
            processor.apply_field(&mut electron, tau, black_box(1e4));
            processor.sample_scattering_event(&mut electron, &mut rng)
        })
    });
}

pub fn bench_trajectory(c: &mut Criterion) {
    let info_desk = Material::GaAs.info_desk(300_f64).unwrap();
    let axis = EnergyAxisBuilder::new()
        .with_number_of_points(1_000)
        .with_energy_range(0_f64..2_f64)
        .build()
        .unwrap();
    let rates = RateTable::build(&axis, &info_desk).unwrap();
    let table = CumulativeTable::build(&rates);
    let processor = ScatteringEventProcessor::new(&table, &info_desk);

    let mut group = c.benchmark_group("trajectory");
    group.sample_size(10);
    for event_budget in [1_000, 10_000].iter() {
        let settings = RunSettings::new(1e4, *event_budget).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(*event_budget),
            event_budget,
            |b, _| {
                b.iter(|| {
                    let mut rng = StdRng::seed_from_u64(1);
                    TrajectorySimulatorBuilder::new()
                        .with_processor(&processor)
                        .with_settings(&settings)
                        .with_recorder(SummaryRecorder::default())
                        .build()
                        .simulate(&mut rng)
                        .unwrap()
                })
            },
        );
    }
}

criterion_group!(
    benches,
    bench_table_construction,
    bench_scattering_event,
    bench_trajectory
);
criterion_main!(benches);
