use class_dict::{ClassComposer, ClassDictionary, ClassValue, TailwindMerger};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Build a class dictionary with `entries` conditional entries and one level of nesting
fn create_dictionary(entries: usize) -> ClassDictionary {
    let classes = [
        "flex", "flex-col", "items-center", "justify-center", "p-4", "m-2",
        "bg-blue-500", "text-white", "rounded-lg", "shadow-md", "hover:bg-blue-600",
        "transition-all", "duration-300", "grid", "grid-cols-3", "gap-4",
    ];

    let mut dict = ClassDictionary::new();
    for i in 0..entries {
        let class = classes[i % classes.len()];
        match i % 4 {
            0 => dict.insert(format!("{} md:{}", class, class), i % 3 != 0),
            1 => dict.insert(format!("label-{}", i), class),
            2 => dict.insert(
                format!("nested-{}", i),
                ClassDictionary::new().with(class, true).with("px-2", i % 2 == 0),
            ),
            _ => dict.insert(format!("thunk-{}", i), ClassValue::thunk(move || class)),
        };
    }
    dict
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let composer = ClassComposer::new();

    for entries in [8, 64, 512].iter() {
        let values = vec![ClassValue::from(create_dictionary(*entries)), "gap-3 bg-white".into()];
        group.bench_with_input(BenchmarkId::new("entries", entries), &values, |b, values| {
            b.iter(|| composer.collect(black_box(values)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    let merger = TailwindMerger::default();

    for entries in [8, 64, 512].iter() {
        let tokens = ClassComposer::new()
            .collect(&[create_dictionary(*entries).into()])
            .unwrap();
        group.bench_with_input(BenchmarkId::new("entries", entries), &tokens, |b, tokens| {
            b.iter(|| merger.resolve(black_box(tokens)));
        });
    }

    group.finish();
}

fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.sample_size(10);
    let composer = ClassComposer::new();

    for count in [100, 1000].iter() {
        let inputs: Vec<Vec<ClassValue>> = (0..*count)
            .map(|i| vec![create_dictionary(16 + i % 16).into()])
            .collect();
        group.bench_with_input(BenchmarkId::new("inputs", count), &inputs, |b, inputs| {
            b.iter(|| composer.collect_batch(black_box(inputs)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_normalize, benchmark_merge, benchmark_batch);
criterion_main!(benches);
