use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;

const NUM_OF_OPERATIONS: usize = 1_000;

fn gen_keys() -> Vec<i32> {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    (0..NUM_OF_OPERATIONS).map(|_| rng.gen::<i32>()).collect()
}

macro_rules! tree_benches {
    ($($module_name:ident: $type_name:ident,)*) => {
        $(
            mod $module_name {
                use keyed_collections::$module_name::$type_name;
                use super::gen_keys;
                use criterion::{Criterion, black_box};

                pub fn bench_insert(c: &mut Criterion) {
                    let keys = gen_keys();
                    c.bench_function(&format!("bench {} insert", stringify!($module_name)), move |b| b.iter(|| {
                        let mut tree = $type_name::new();
                        black_box(tree.insert_all(keys.iter().cloned()));
                    }));
                }

                pub fn bench_search(c: &mut Criterion) {
                    let keys = gen_keys();
                    let mut tree = $type_name::new();
                    tree.insert_all(keys.iter().cloned());

                    c.bench_function(&format!("bench {} search", stringify!($module_name)), move |b| b.iter(|| {
                        for key in &keys {
                            black_box(tree.search(*key));
                        }
                    }));
                }

                pub fn bench_delete(c: &mut Criterion) {
                    let keys = gen_keys();
                    c.bench_function(&format!("bench {} delete", stringify!($module_name)), move |b| b.iter(|| {
                        let mut tree = $type_name::new();
                        tree.insert_all(keys.iter().cloned());
                        black_box(tree.delete_all(keys.iter().cloned()));
                    }));
                }
            }
        )*

        criterion_group!(
            benches,
            $(
                $module_name::bench_insert,
                $module_name::bench_search,
                $module_name::bench_delete,
            )*
        );
    };
}

tree_benches!(
    avl_tree: AvlTree,
    splay_tree: SplayTree,
);

fn bench_btreeset_search(c: &mut Criterion) {
    let keys = gen_keys();
    let set: std::collections::BTreeSet<i32> = keys.iter().cloned().collect();

    c.bench_function("bench btreeset search", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(set.contains(key));
            }
        })
    });
}

criterion_group!(baseline, bench_btreeset_search);
criterion_main!(benches, baseline);
