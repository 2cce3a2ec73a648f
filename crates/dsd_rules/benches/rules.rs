use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use dsd_rules::Enumerator;
use dsd_rules::canonical_state;

pub fn enumeration_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("Rules");

    let state = canonical_state([
        ("<t^ b>", 10),
        ("{t^*}[x t^]:[b t^]:[a t^]:[a]", 40),
        ("[x]:[t^ b]:[t^ b]:[t^ a]{t^*}", 40),
        ("<t^ x>", 40),
        ("<t^ a>", 40),
        ("<b t^>", 40),
    ])
    .unwrap();
    let enumerator = Enumerator::default();

    group.bench_function("All reactions of the AND-gate state.", |b| {
        b.iter(|| {
            let _ = enumerator.novel_reactions(&state);
        });
    });

    group.bench_function("Two rounds of network exploration.", |b| {
        b.iter(|| {
            let _ = enumerator.reachable(&state, 2);
        });
    });
}

criterion_group!(benches, enumeration_round);
criterion_main!(benches);
