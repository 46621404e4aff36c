use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use secded::ecc::secded::{enc_secded_39_32, enc_secded_inv_72_64};
use secded::{CodeVariant, Encoder, Polarity};

fn bench_fixed_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("SECDED Fixed Width");

    group.bench_function("enc_secded_39_32", |b| {
        b.iter(|| enc_secded_39_32(black_box(&[0xef, 0xbe, 0xad, 0xde])))
    });
    group.bench_function("enc_secded_inv_72_64", |b| {
        b.iter(|| enc_secded_inv_72_64(black_box(&[0x5a; 8])))
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("SECDED Batch");
    let mut rng = StdRng::seed_from_u64(42);

    for variant in CodeVariant::ALL {
        let encoder = Encoder::new(variant, Polarity::Inverted);
        let data: Vec<u8> = (0..variant.byte_len() * 4096).map(|_| rng.gen()).collect();

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("encode_batch", variant),
            &data,
            |b, data| b.iter(|| encoder.encode_batch(black_box(data))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_fixed_width, bench_batch);
criterion_main!(benches);
