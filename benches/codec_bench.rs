use criterion::{criterion_group, criterion_main, Criterion};
use wordcode::{BitstreamDecoder, DictionaryIndex, FrequencyTable, SentenceCodec, WordCoder};

// Zipf-like counts over a 50k-word vocabulary.
fn table() -> FrequencyTable {
    let words: Vec<(String, u64)> = (0..50_000u64)
        .map(|rank| (format!("word{rank}"), 10_000_000 / (rank + 1)))
        .collect();
    FrequencyTable::build(words).unwrap()
}

fn dictionary() -> DictionaryIndex {
    DictionaryIndex::new((0..1u32 << 18).map(|i| format!("d{i:05x}"))).unwrap()
}

fn sentence() -> Vec<String> {
    (0..200u64)
        .map(|i| format!("word{}", (i * i * 7919) % 5_000))
        .collect()
}

fn bench_word_coder(c: &mut Criterion) {
    let table = table();
    let coder = WordCoder::new(&table);
    let mut group = c.benchmark_group("word_coder");

    group.bench_function("encode_common", |b| b.iter(|| coder.encode("word3").unwrap()));
    group.bench_function("encode_rare", |b| b.iter(|| coder.encode("word49999").unwrap()));
}

fn bench_sentence(c: &mut Criterion) {
    let table = table();
    let dictionary = dictionary();
    let codec = SentenceCodec::new(&table, &dictionary).unwrap();
    let sentence = sentence();
    let mut group = c.benchmark_group("sentence_200_words");

    group.bench_function("encode", |b| b.iter(|| codec.encode(&sentence).unwrap()));

    let encoded = codec.encode(&sentence).unwrap();
    group.bench_function("decode", |b| b.iter(|| codec.decode(&encoded).unwrap()));

    let bits = codec.encode_bits(&sentence).unwrap();
    group.bench_function("narrow_bits", |b| {
        b.iter(|| BitstreamDecoder::new(&table).decode(&bits).unwrap())
    });
}

criterion_group!(benches, bench_word_coder, bench_sentence);
criterion_main!(benches);
