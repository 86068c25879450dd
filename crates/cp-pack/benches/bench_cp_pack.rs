use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cp_core::TableConfig;
use cp_pack::{pack, BaseN};
use rand::{Rng, SeedableRng};

fn bench_base_n(c: &mut Criterion) {
    let cfg = TableConfig::pico8();
    let codec = BaseN::new(&cfg.alphabet).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    let data: Vec<u8> = (0..2048).map(|_| rng.gen()).collect();
    let token = codec.encode(&data);

    c.bench_function("base_n_encode_2kb", |b| b.iter(|| black_box(codec.encode(black_box(&data)))));
    c.bench_function("base_n_decode_2kb", |b| {
        b.iter(|| black_box(codec.decode(black_box(&token)).unwrap()))
    });
}

fn bench_pack(c: &mut Criterion) {
    let cfg = TableConfig::pico8();
    let cart = "function _draw() cls() for i=0,15 do circfill(64,64,i,i) end end ".repeat(100);
    c.bench_function("pack_cart_6kb", |b| {
        b.iter(|| black_box(pack(black_box(cart.as_bytes()), &cfg.alphabet).unwrap()))
    });
}

criterion_group!(benches, bench_base_n, bench_pack);
criterion_main!(benches);
