// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Walkthrough: observe a scroll view's delegate callbacks through a proxy.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use delegate_proxy::core::logging;
use delegate_proxy::prelude::*;

const DID_SCROLL: Selector = Selector::from_static("scrollViewDidScroll:");
const DID_END_DRAGGING: Selector = Selector::from_static("scrollViewDidEndDragging:");

#[derive(Parser)]
#[command(name = "delegate-proxy-demo")]
#[command(author, version, about = "Observe delegate callbacks through a proxy", long_about = None)]
struct Args {
    /// Proxy config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of scroll callbacks to deliver
    #[arg(long, default_value_t = 3)]
    scrolls: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init();

    let config = match &args.config {
        Some(path) => ProxyConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ProxyConfig::default(),
    };
    tracing::info!("Using {:?}", config);

    let scroll_view_class = Arc::new(
        Class::new("ScrollView").with_property("delegate", "delegate", "setDelegate:"),
    );
    let scroll_view = Object::new(scroll_view_class);
    let slot = DelegateSlot::new("delegate", "setDelegate:").with_config(config);

    // The controller only cares about the end of a drag.
    let controller: DelegateRef = Arc::new(HandlerDelegate::new().on(DID_END_DRAGGING, |_| {
        tracing::info!("[controller] Drag ended");
        Ok(serde_json::Value::Null)
    }));
    scroll_view.set(slot.setter(), Arc::clone(&controller))?;

    let scrolls = slot.reactive(&scroll_view).events(DID_SCROLL)?;
    let drags_ended = slot.reactive(&scroll_view).trigger(DID_END_DRAGGING)?;

    for offset in 0..args.scrolls {
        scroll_view.send_to_delegate(
            slot.getter(),
            &Message::new(DID_SCROLL, vec![json!({ "y": offset * 10 })]),
        )?;
    }
    scroll_view.send_to_delegate(slot.getter(), &Message::unit(DID_END_DRAGGING))?;

    for arguments in scrolls.drain() {
        tracing::info!("[observer] Scrolled: {:?}", arguments);
    }
    tracing::info!("[observer] Drags ended: {}", drags_ended.drain().len());

    drop(scroll_view);
    match scrolls.try_next() {
        Next::Completed => tracing::info!("[observer] Scroll stream completed"),
        other => tracing::warn!("[observer] Scroll stream still open: {:?}", other),
    }

    Ok(())
}
