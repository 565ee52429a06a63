//! Criterion benchmarks for the crowd lemmatizer.

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use crowd_lemmatizer::analysis::morphology::EnglishMorphology;
use crowd_lemmatizer::prelude::*;

/// Generate tagged test messages for benchmarking.
fn generate_test_messages(count: usize) -> Vec<Message> {
    let words = [
        ("running", "VBG"),
        ("the", "DT"),
        ("dogs", "NNS"),
        ("walked", "VBD"),
        ("happier", "JJR"),
        ("children", "NNS"),
        ("makes", "VBZ"),
        ("quickly", "RB"),
        ("biggest", "JJS"),
        ("went", "VBD"),
    ];

    (0..count)
        .map(|i| {
            let tokens = words
                .iter()
                .enumerate()
                .map(|(position, (text, pos))| {
                    let token = Token::new(*text, position).with_pos(*pos);
                    if *pos == "DT" { token.stop() } else { token }
                })
                .collect();
            Message::new(format!("m{i}")).with_tokens(tokens)
        })
        .collect()
}

fn bench_morphology(c: &mut Criterion) {
    let morphology = EnglishMorphology::new();
    let words = [("running", "VBG"), ("cities", "NNS"), ("went", "VBD"), ("larger", "JJR")];
    let mut group = c.benchmark_group("morphology");
    group.throughput(Throughput::Elements(words.len() as u64));

    group.bench_function("english_lemma", |b| {
        b.iter(|| {
            for (word, pos) in words {
                black_box(morphology.lemma(black_box(word), Some(pos)).unwrap());
            }
        })
    });

    group.finish();
}

fn bench_operator(c: &mut Criterion) {
    let plugin = LemmatizerPlugin::new();
    let messages = generate_test_messages(1000);
    let mut group = c.benchmark_group("operator");
    group.throughput(Throughput::Elements(messages.len() as u64));

    for mode in [CalculationMode::All, CalculationMode::New] {
        let operator = plugin.operator(Some(LemmatizerConfig::new(mode)));

        group.bench_function(format!("sequential_{mode}"), |b| {
            b.iter(|| {
                for message in messages.iter().cloned() {
                    black_box(operator.call(message).unwrap());
                }
            })
        });

        group.bench_function(format!("parallel_{mode}"), |b| {
            b.iter(|| black_box(operator.call_batch(messages.clone()).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_morphology, bench_operator);
criterion_main!(benches);
