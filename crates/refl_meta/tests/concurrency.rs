//! Concurrent first lookups share one entry per type.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::{Arc, Barrier};
use std::thread;

use refl_meta::{ClassInfo, ClassInfoCache};
use refl_runtime::{ClassHandle, MemoryRuntime, Runtime};

const THREADS: usize = 8;
const DEPTH: usize = 6;

/// A linear chain `T0 ◄── T1 ◄── ... ◄── T{DEPTH-1}`, returning the leaf.
fn chain(rt: &MemoryRuntime) -> ClassHandle {
    let mut parent = None;
    let mut leaf = ClassHandle::NONE;
    for level in 0..DEPTH {
        let cls = rt.define_class(&format!("T{level}"), parent).unwrap();
        rt.add_method(cls, &format!("m{level}"), "v16@0:8", None)
            .unwrap();
        rt.add_ivar(cls, &format!("_f{level}"), "i", 8).unwrap();
        parent = Some(cls);
        leaf = cls;
    }
    leaf
}

#[test]
fn racing_threads_get_the_same_descriptor() {
    let rt = Arc::new(MemoryRuntime::new());
    let leaf = chain(&rt);
    let cache = ClassInfoCache::new(rt);
    let barrier = Barrier::new(THREADS);

    let results: Vec<Arc<ClassInfo>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    cache.get(leaf).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let first = &results[0];
    for info in &results[1..] {
        assert!(Arc::ptr_eq(first, info));
    }
    assert_eq!(first.methods().len(), DEPTH);
    assert_eq!(first.ivars().len(), DEPTH);
    assert_eq!(first.ancestors().count(), DEPTH - 1);
    assert_eq!(cache.len(), DEPTH);
}

#[test]
fn lookups_during_invalidation_always_see_complete_snapshots() {
    let rt = Arc::new(MemoryRuntime::new());
    let leaf = chain(&rt);
    let root = rt.lookup_class("T0").unwrap();
    let cache = ClassInfoCache::new(rt);
    cache.get(leaf).unwrap();

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..200 {
                cache.mark_needs_update(root);
                cache.mark_needs_update(leaf);
            }
        });
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..200 {
                    let info = cache.get(leaf).unwrap();
                    assert_eq!(info.methods().len(), DEPTH);
                    assert_eq!(info.ancestors().count(), DEPTH - 1);
                }
            });
        }
    });

    let settled = cache.get(leaf).unwrap();
    assert!(!settled.needs_update());
    assert_eq!(cache.len(), DEPTH);
}
