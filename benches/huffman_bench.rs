use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use huffman::Compression;

fn sample_text(len: usize) -> String {
    const WORDS: [&str; 8] = [
        "the ", "quick ", "brown ", "fox ", "jumps ", "over ", "lazy ", "dogs. ",
    ];
    WORDS.iter().cycle().take(len).copied().collect()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    for &words in &[100usize, 10_000] {
        let text = sample_text(words);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("{words}_words"), |b| {
            b.iter(|| Compression::compress(black_box(&text)).unwrap())
        });
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    for &words in &[100usize, 10_000] {
        let text = sample_text(words);
        let compressed = Compression::compress(&text).unwrap();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("{words}_words"), |b| {
            b.iter(|| black_box(&compressed).decompress().unwrap())
        });
    }
    group.finish();
}

fn bench_single_symbol(c: &mut Criterion) {
    let text = "a".repeat(100_000);
    let compressed = Compression::compress(&text).unwrap();

    c.bench_function("single_symbol/decompress", |b| {
        b.iter(|| black_box(&compressed).decompress().unwrap())
    });
}

criterion_group!(benches, bench_compress, bench_decompress, bench_single_symbol);
criterion_main!(benches);
