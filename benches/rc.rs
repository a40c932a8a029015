use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sharc::Rc as SharcRc;
use std::rc::Rc as StdRc;

// A simple struct to test reference counting
#[derive(Debug)]
struct TestStruct {
    x: u8,
    y: u8,
}

// Benchmark the creation of a new reference-counted object
fn new_rc_benchmark(c: &mut Criterion) {
    c.bench_function("sharc::Rc::new", |b| {
        b.iter(|| {
            let obj = SharcRc::new(black_box(TestStruct { x: 0, y: 0 }));
            black_box(obj)
        })
    });
    c.bench_function("std::rc::Rc::new", |b| {
        b.iter(|| {
            let obj = StdRc::new(black_box(TestStruct { x: 0, y: 0 }));
            black_box(obj)
        })
    });
}

// Benchmark cloning a reference-counted object
fn clone_rc_benchmark(c: &mut Criterion) {
    let sharc_obj = SharcRc::new(black_box(TestStruct { x: 0, y: 0 }));
    c.bench_function("sharc::Rc::clone", |b| {
        b.iter(|| {
            let obj_clone = black_box(sharc_obj.clone());
            black_box(obj_clone)
        })
    });
    let obj = StdRc::new(black_box(TestStruct { x: 0, y: 0 }));
    c.bench_function("std::rc::Rc::clone", |b| {
        b.iter(|| {
            let obj_clone = black_box(obj.clone());
            black_box(obj_clone)
        })
    });
}

// Benchmark dropping a reference-counted object
fn drop_rc_benchmark(c: &mut Criterion) {
    let sharc_obj = SharcRc::new(black_box(TestStruct { x: 0, y: 0 }));
    c.bench_function("sharc::Rc::drop", |b| {
        b.iter(|| {
            let obj_clone = black_box(sharc_obj.clone());
            drop(obj_clone);
        })
    });
    let obj = StdRc::new(black_box(TestStruct { x: 0, y: 0 }));
    c.bench_function("std::rc::Rc::drop", |b| {
        b.iter(|| {
            let obj_clone = black_box(obj.clone());
            drop(obj_clone);
        })
    });
}

// Benchmark accessing fields of a reference-counted object
fn access_rc_benchmark(c: &mut Criterion) {
    let sharc_obj = SharcRc::new(black_box(TestStruct { x: 0, y: 0 }));
    c.bench_function("sharc::Rc::access", |b| {
        b.iter(|| {
            let x = black_box(sharc_obj.x);
            let y = black_box(sharc_obj.y);
            assert_eq!(x, 0);
            assert_eq!(y, 0);
            (x, y)
        })
    });
    let obj = StdRc::new(black_box(TestStruct { x: 0, y: 0 }));
    c.bench_function("std::rc::Rc::access", |b| {
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
fn downgrade_rc_benchmark(c: &mut Criterion) {
    let sharc_obj = SharcRc::new(black_box(TestStruct { x: 0, y: 0 }));
    c.bench_function("sharc::Rc::downgrade", |b| {
        b.iter(|| {
            let weak = SharcRc::downgrade(&sharc_obj);
            black_box(weak)
        })
    });
    let obj = StdRc::new(black_box(TestStruct { x: 0, y: 0 }));
    c.bench_function("std::rc::Rc::downgrade", |b| {
        b.iter(|| {
            let weak = StdRc::downgrade(&obj);
            black_box(weak)
        })
    });
}

// Benchmark upgrading a live weak reference
fn upgrade_rc_benchmark(c: &mut Criterion) {
    let sharc_obj = SharcRc::new(black_box(TestStruct { x: 0, y: 0 }));
    let sharc_weak = SharcRc::downgrade(&sharc_obj);
    c.bench_function("sharc::rc::Weak::upgrade", |b| {
        b.iter(|| {
            let strong = sharc_weak.upgrade().unwrap();
            black_box(strong)
        })
    });
    let obj = StdRc::new(black_box(TestStruct { x: 0, y: 0 }));
    let weak = StdRc::downgrade(&obj);
    c.bench_function("std::rc::Weak::upgrade", |b| {
        b.iter(|| {
            let strong = weak.upgrade().unwrap();
            black_box(strong)
        })
    });
}

criterion_group!(
    rc_benches,
    access_rc_benchmark,
    new_rc_benchmark,
    clone_rc_benchmark,
    drop_rc_benchmark,
    downgrade_rc_benchmark,
    upgrade_rc_benchmark,
);

criterion_main!(rc_benches);
