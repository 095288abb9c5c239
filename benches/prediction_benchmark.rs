use criterion::{black_box, criterion_group, criterion_main, Criterion};
use playtennis::{TennisPredictor, TrainingSet, WeatherInput};

const CANONICAL_CSV: &str = include_str!("../data/play_tennis.csv");

fn setup_benchmark_predictor() -> TennisPredictor {
    let set = TrainingSet::from_csv_bytes(CANONICAL_CSV.as_bytes()).unwrap();
    TennisPredictor::builder()
        .with_training_set(set)
        .unwrap()
        .build()
        .unwrap()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build");
    group.sample_size(50);

    group.bench_function("fit_from_canonical_dataset", |b| {
        b.iter(|| {
            let set = TrainingSet::from_csv_bytes(black_box(CANONICAL_CSV.as_bytes())).unwrap();
            TennisPredictor::builder()
                .with_training_set(set)
                .unwrap()
                .build()
                .unwrap()
        })
    });

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let predictor = setup_benchmark_predictor();
    let input = WeatherInput {
        outlook: "Sunny".to_string(),
        temp: "Cool".to_string(),
        humidity: "High".to_string(),
        wind: "Strong".to_string(),
    };

    let mut group = c.benchmark_group("Prediction");
    group.sample_size(100);

    group.bench_function("single_observation", |b| {
        b.iter(|| predictor.predict(black_box(&input)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_prediction);
criterion_main!(benches);
