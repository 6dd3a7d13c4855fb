use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use eignung_core::assembler::Assembler;
use eignung_core::model::{Category, Composite, Difficulty, Selection};
use eignung_core::validate::validate_test;

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    let assembler = Assembler::default();

    group.bench_function("full_test_30", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| {
            assembler.assemble(
                black_box(Selection::Composite(Composite::FullTest)),
                black_box(Difficulty::Expert),
                black_box(30),
                &mut rng,
            )
        })
    });

    group.bench_function("number_sequences_10", |b| {
        let mut rng = StdRng::seed_from_u64(2);
        b.iter(|| {
            assembler.assemble(
                black_box(Selection::Area(Category::NumberSequences)),
                black_box(Difficulty::Medium),
                black_box(10),
                &mut rng,
            )
        })
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let test = Assembler::default()
        .assemble(
            Selection::Composite(Composite::FullTest),
            Difficulty::Hard,
            30,
            &mut rng,
        )
        .expect("assembly");

    c.bench_function("validate_test_30", |b| {
        b.iter(|| validate_test(black_box(&test)))
    });
}

criterion_group!(benches, bench_assemble, bench_validate);
criterion_main!(benches);
