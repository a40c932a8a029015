use std::sync::atomic::{AtomicUsize, Ordering::Relaxed};
use std::{thread, time::Duration};

use sharc::arc::{Arc, Weak};

struct DetectDrop(&'static AtomicUsize);

impl Drop for DetectDrop {
    fn drop(&mut self) {
        self.0.fetch_add(1, Relaxed);
    }
}

#[test]
fn simple() {
    let a = Arc::new(!0usize);
    drop(a);
}

#[cfg(miri)]
const THREAD_COUNT: usize = 2;
#[cfg(not(miri))]
const THREAD_COUNT: usize = 8;

#[test]
fn multithread() {
    let a = Arc::new(!0usize);
    for _ in 0..THREAD_COUNT {
        let a = a.clone();
        thread::spawn(move || {
            if *a != !0 {
                panic!("Whaaat, invalid somehow?")
            }
        });
    }
    std::thread::sleep(Duration::from_millis(100));
}

#[test]
fn multi_multithread() {
    let a = Arc::new(!0usize);
    for _ in 0..THREAD_COUNT {
        let a = a.clone();
        thread::spawn(move || {
            for _ in 0..THREAD_COUNT {
                let a = a.clone();
                thread::spawn(move || {
                    if *a != !0 {
                        panic!("Whaaat, invalid somehow?")
                    }
                });
            }
        });
    }
    std::thread::sleep(Duration::from_millis(100));
}

#[test]
fn drops_once_across_threads() {
    static DROPS: AtomicUsize = AtomicUsize::new(0);

    let x = Arc::new(("hello", DetectDrop(&DROPS)));
    let y = x.clone();
    let t = thread::spawn(move || {
        assert_eq!(x.0, "hello");
    });
    assert_eq!(y.0, "hello");
    t.join().unwrap();
    assert_eq!(DROPS.load(Relaxed), 0);
    drop(y);
    assert_eq!(DROPS.load(Relaxed), 1);
}

#[test]
fn weak_observes_expiry() {
    static DROPS: AtomicUsize = AtomicUsize::new(0);

    let s1 = Arc::new(DetectDrop(&DROPS));
    let s2 = s1.clone();
    let w = Arc::downgrade(&s1);
    assert_eq!(2, Arc::strong_count(&s1));
    assert_eq!(1, Arc::weak_count(&s1));

    drop(s1);
    drop(s2);
    assert_eq!(DROPS.load(Relaxed), 1);
    assert!(w.expired());
    assert!(w.upgrade().is_none());
    assert!(w.upgrade().is_none());
}

#[test]
fn upgrade_from_another_thread() {
    static DROPS: AtomicUsize = AtomicUsize::new(0);

    let s = Arc::new(DetectDrop(&DROPS));
    let w = Arc::downgrade(&s);
    let t = thread::spawn(move || {
        let s2 = w.upgrade().expect("owner still alive on spawn");
        assert!(Arc::strong_count(&s2) >= 1);
    });
    t.join().unwrap();
    assert_eq!(DROPS.load(Relaxed), 0);
    drop(s);
    assert_eq!(DROPS.load(Relaxed), 1);
}

// Clones, drops, and upgrades hammer one allocation in parallel; the value
// must still be dropped exactly once, only after the last owner is gone.
#[test]
fn concurrent_clone_and_upgrade_stress() {
    use rayon::prelude::*;

    static DROPS: AtomicUsize = AtomicUsize::new(0);
    #[cfg(miri)]
    const ITERATIONS: usize = 64;
    #[cfg(not(miri))]
    const ITERATIONS: usize = 4096;

    let arc = Arc::new(DetectDrop(&DROPS));
    let weak = Arc::downgrade(&arc);

    (0..ITERATIONS).into_par_iter().for_each(|i| {
        if i % 2 == 0 {
            let s = arc.clone();
            assert!(Arc::strong_count(&s) >= 1);
        } else if let Some(s) = weak.upgrade() {
            // A successful upgrade is an owner; the value cannot have died.
            assert_eq!(DROPS.load(Relaxed), 0);
            drop(s);
        }
    });

    assert_eq!(DROPS.load(Relaxed), 0);
    drop(arc);
    assert_eq!(DROPS.load(Relaxed), 1);
    assert!(weak.expired());
    assert!(weak.upgrade().is_none());
}

#[test]
fn weak_outlives_strong_across_threads() {
    static DROPS: AtomicUsize = AtomicUsize::new(0);

    let s = Arc::new(DetectDrop(&DROPS));
    let w = Arc::downgrade(&s);
    let t = thread::spawn(move || drop(s));
    t.join().unwrap();
    assert_eq!(DROPS.load(Relaxed), 1);
    assert!(w.upgrade().is_none());
    drop(w);
    assert_eq!(DROPS.load(Relaxed), 1);
}

#[test]
fn try_unwrap_expires_weak_handles() {
    let s = Arc::new(7u32);
    let w = Arc::downgrade(&s);
    assert_eq!(7, Arc::try_unwrap(s).unwrap());
    assert!(w.expired());
    assert!(w.upgrade().is_none());
}

#[test]
fn get_mut_blocked_by_weak() {
    let mut s = Arc::new(3u32);
    assert!(Arc::get_mut(&mut s).is_some());
    let w = Arc::downgrade(&s);
    assert!(Arc::get_mut(&mut s).is_none());
    drop(w);
    *Arc::get_mut(&mut s).unwrap() = 4;
    assert_eq!(4, *s);
}

#[test]
fn empty_weak() {
    let w: Weak<u32> = Weak::new();
    assert!(w.expired());
    assert!(w.upgrade().is_none());
    assert_eq!(0, w.strong_count());
    assert_eq!(0, w.weak_count());
    let w2 = w.clone();
    assert!(w2.upgrade().is_none());
}
