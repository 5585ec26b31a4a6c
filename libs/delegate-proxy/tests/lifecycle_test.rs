// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Lifecycle: streams complete with their host, the proxy never keeps its
//! host or its real delegate alive.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use delegate_proxy::prelude::*;

fn scroll_view() -> Arc<Object> {
    let class = Class::new("ScrollView").with_property("delegate", "delegate", "setDelegate:");
    Object::new(Arc::new(class))
}

fn slot() -> DelegateSlot {
    DelegateSlot::new("delegate", "setDelegate:")
}

#[test]
fn test_streams_complete_when_host_is_dropped() {
    let object = scroll_view();
    let shown = slot().reactive(&object).trigger("viewDidShow").unwrap();
    let scrolls = slot().reactive(&object).events("scrollViewDidScroll:").unwrap();

    object
        .send_to_delegate(slot().getter(), &Message::new("scrollViewDidScroll:", vec![json!(3)]))
        .unwrap();
    drop(object);

    // Buffered values are still delivered before completion.
    assert_eq!(scrolls.try_next(), Next::Value(vec![json!(3)]));
    assert_eq!(scrolls.try_next(), Next::Completed);
    assert_eq!(shown.try_next(), Next::Completed);
    assert_eq!(shown.next_timeout(Duration::from_millis(10)), Next::Completed);
    assert!(shown.drain().is_empty());
}

#[test]
fn test_subscribing_after_host_ended_completes_immediately() {
    let object = scroll_view();
    let proxy = slot().proxy(&object).unwrap();
    drop(object);

    assert!(proxy.lifetime().has_ended());
    let late = proxy.trigger("viewDidShow").unwrap();
    assert_eq!(late.try_next(), Next::Completed);
}

#[test]
fn test_proxy_does_not_keep_host_alive() {
    let object = scroll_view();
    let proxy = slot().proxy(&object).unwrap();
    let weak_object = Arc::downgrade(&object);

    drop(object);

    assert!(weak_object.upgrade().is_none());
    // Structural changes after the host is gone are no-ops.
    proxy.intercept("viewDidShow").unwrap();
}

#[test]
fn test_proxy_is_released_with_host() {
    let object = scroll_view();
    let weak_proxy = Arc::downgrade(&slot().proxy(&object).unwrap());
    assert!(weak_proxy.upgrade().is_some());

    drop(object);
    assert!(weak_proxy.upgrade().is_none());
}

#[test]
fn test_proxy_does_not_keep_real_delegate_alive() {
    let object = scroll_view();
    let real: DelegateRef = Arc::new(
        HandlerDelegate::new().on("scrollViewDidEndDragging:", |_| Ok(json!("ended"))),
    );
    object.set(slot().setter(), Arc::clone(&real)).unwrap();
    let proxy = slot().proxy(&object).unwrap();
    assert!(proxy.forwardee().is_some());

    drop(real);

    assert!(proxy.forwardee().is_none());
    let reply = object
        .send_to_delegate(slot().getter(), &Message::unit("scrollViewDidEndDragging:"))
        .unwrap();
    assert_eq!(reply, None);
}

#[test]
fn test_runtime_subclass_released_with_last_instance() {
    let base = Arc::new(
        Class::new("ScrollView").with_property("delegate", "delegate", "setDelegate:"),
    );
    let object = Object::new(Arc::clone(&base));
    slot().proxy(&object).unwrap();
    let subclass = Arc::downgrade(&object.class());

    drop(object);
    assert!(subclass.upgrade().is_none());

    // A fresh instance gets a fresh subclass, redirected once.
    let object = Object::new(Arc::clone(&base));
    slot().proxy(&object).unwrap();
    assert_eq!(object.class().method_replacements(), 1);
}
