// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Concurrent installation: one proxy per (object, slot), one setter
//! redirection per (class, setter), no matter how many threads race.

use std::sync::{Arc, Barrier};
use std::thread;

use delegate_proxy::core::swizzle;
use delegate_proxy::prelude::*;

const THREADS: usize = 8;

fn scroll_view_class() -> Arc<Class> {
    Arc::new(Class::new("ScrollView").with_property("delegate", "delegate", "setDelegate:"))
}

#[test]
fn test_racing_installs_on_one_object_share_a_proxy() {
    let object = Object::new(scroll_view_class());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let object = Arc::clone(&object);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let slot = DelegateSlot::new("delegate", "setDelegate:");
                barrier.wait();
                slot.proxy(&object).unwrap()
            })
        })
        .collect();

    let proxies: Vec<Arc<DelegateProxy>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    for proxy in &proxies[1..] {
        assert!(Arc::ptr_eq(&proxies[0], proxy));
    }
    assert_eq!(object.class().method_replacements(), 1);
}

#[test]
fn test_racing_installs_across_objects_swizzle_once() {
    let class = scroll_view_class();
    let objects: Vec<Arc<Object>> = (0..THREADS)
        .map(|_| Object::new(Arc::clone(&class)))
        .collect();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = objects
        .iter()
        .map(|object| {
            let object = Arc::clone(object);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let slot = DelegateSlot::new("delegate", "setDelegate:");
                barrier.wait();
                let events = slot.reactive(&object).trigger("scrollViewDidScroll:").unwrap();
                object
                    .send_to_delegate(slot.getter(), &Message::unit("scrollViewDidScroll:"))
                    .unwrap();
                events.drain().len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }

    let subclass = objects[0].class();
    assert!(subclass.is_runtime_subclass());
    assert!(objects.iter().all(|o| Arc::ptr_eq(&o.class(), &subclass)));
    assert!(swizzle::is_swizzled(&subclass, &"setDelegate:".into()));
    assert_eq!(subclass.method_replacements(), 1);
    assert_eq!(class.method_replacements(), 0);
}

#[test]
fn test_concurrent_deliveries_reach_every_subscriber() {
    let object = Object::new(scroll_view_class());
    let slot = DelegateSlot::new("delegate", "setDelegate:");
    let first = slot.reactive(&object).trigger("viewDidShow").unwrap();
    let second = slot.reactive(&object).trigger("viewDidShow").unwrap();

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                object
                    .send_to_delegate(slot.getter(), &Message::unit("viewDidShow"))
                    .unwrap();
            });
        }
    });

    assert_eq!(first.len(), THREADS);
    assert_eq!(second.len(), THREADS);
}
