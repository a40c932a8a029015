use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sharc::Arc as SharcArc;
use std::sync::Arc;

// A simple struct to test reference counting
#[derive(Debug)]
struct TestStruct {
    x: u8,
    y: u8,
}

fn create_arc_benchmark(c: &mut Criterion) {
    c.bench_function("sharc::Arc::new", |b| {
        b.iter(|| {
            let data = black_box([42; 1024]);

            SharcArc::new(data)
        })
    });
    c.bench_function("std::sync::Arc::new", |b| {
        b.iter(|| {
            let data = black_box([42; 1024]);

            Arc::new(data)
        })
    });
}

fn clone_arc_benchmark(c: &mut Criterion) {
    let std_arc = Arc::new([42; 1024]);
    let sharc_arc = SharcArc::new([42; 1024]);
    c.bench_function("sharc::Arc::clone", |b| {
        b.iter(|| SharcArc::clone(&sharc_arc))
    });
    c.bench_function("std::sync::Arc::clone", |b| b.iter(|| Arc::clone(&std_arc)));
}

fn drop_arc_benchmark(c: &mut Criterion) {
    let std_arc = Arc::new([42; 1024]);
    let sharc_arc = SharcArc::new([42; 1024]);
    c.bench_function("sharc::Arc::drop", |b| {
        b.iter(|| {
            let cloned = SharcArc::clone(&sharc_arc);
            std::mem::drop(black_box(cloned));
        })
    });
    c.bench_function("std::sync::Arc::drop", |b| {
        b.iter(|| {
            let cloned = Arc::clone(&std_arc);
            std::mem::drop(black_box(cloned));
        })
    });
}

// Benchmark accessing fields of a reference-counted object
fn access_arc_benchmark(c: &mut Criterion) {
    let obj = Arc::new(black_box(TestStruct { x: 0, y: 0 }));
    let sharc_obj = SharcArc::new(black_box(TestStruct { x: 0, y: 0 }));
    c.bench_function("sharc::Arc::access", |b| {
        b.iter(|| {
            let x = black_box(sharc_obj.x);
            let y = black_box(sharc_obj.y);
            assert_eq!(x, 0);
            assert_eq!(y, 0);
            (x, y)
        })
    });
    c.bench_function("std::sync::Arc::access", |b| {
        b.iter(|| {
            let x = black_box(obj.x);
            let y = black_box(obj.y);
            assert_eq!(x, 0);
            assert_eq!(y, 0);
            (x, y)
        })
    });
}

// Benchmark creating and dropping a weak reference
fn downgrade_arc_benchmark(c: &mut Criterion) {
    let sharc_arc = SharcArc::new([42; 1024]);
    c.bench_function("sharc::Arc::downgrade", |b| {
        b.iter(|| {
            let weak = SharcArc::downgrade(&sharc_arc);
            black_box(weak)
        })
    });
    let std_arc = Arc::new([42; 1024]);
    c.bench_function("std::sync::Arc::downgrade", |b| {
        b.iter(|| {
            let weak = Arc::downgrade(&std_arc);
            black_box(weak)
        })
    });
}

// Benchmark upgrading a live weak reference
fn upgrade_arc_benchmark(c: &mut Criterion) {
    let sharc_arc = SharcArc::new([42; 1024]);
    let sharc_weak = SharcArc::downgrade(&sharc_arc);
    c.bench_function("sharc::arc::Weak::upgrade", |b| {
        b.iter(|| {
            let strong = sharc_weak.upgrade().unwrap();
            black_box(strong)
        })
    });
    let std_arc = Arc::new([42; 1024]);
    let std_weak = Arc::downgrade(&std_arc);
    c.bench_function("std::sync::Weak::upgrade", |b| {
        b.iter(|| {
            let strong = std_weak.upgrade().unwrap();
            black_box(strong)
        })
    });
}

criterion_group!(
    arc_bench,
    access_arc_benchmark,
    create_arc_benchmark,
    clone_arc_benchmark,
    drop_arc_benchmark,
    downgrade_arc_benchmark,
    upgrade_arc_benchmark
);
criterion_main!(arc_bench);
