use criterion::{criterion_group, criterion_main, Criterion, black_box};
use pieboard::board::cozy::attack_counts;
use pieboard::fen::parse_fen;
use pieboard::EditBoard;

fn bench_attacks(c: &mut Criterion) {
    let start = EditBoard::standard();
    c.bench_function("attack_counts_startpos", |ben| {
        ben.iter(|| black_box(attack_counts(black_box(&start))))
    });
    let crowded = parse_fen("qqqqkqqq/nnnnnnnn/8/8/8/8/QQQQQQQQ/BBBBKBBB w - - 0 1").unwrap_or_default();
    c.bench_function("attack_counts_crowded", |ben| {
        ben.iter(|| black_box(attack_counts(black_box(&crowded))))
    });
}

criterion_group!(benches, bench_attacks);
criterion_main!(benches);
