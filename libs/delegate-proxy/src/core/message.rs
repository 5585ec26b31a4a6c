// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Message identifiers and bridged argument lists.

use std::borrow::Cow;
use std::fmt;

/// Opaque name of a callback dispatched to a delegate, e.g. `scrollViewDidScroll:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector(Cow<'static, str>);

impl Selector {
    /// Selector backed by a static string. Usable in `const` items.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Selector {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&Selector> for Selector {
    fn from(selector: &Selector) -> Self {
        selector.clone()
    }
}

/// Arguments of a dispatched message, bridged to JSON values.
pub type Arguments = Vec<serde_json::Value>;

/// A single callback delivery: which selector, with which arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub selector: Selector,
    pub arguments: Arguments,
}

impl Message {
    pub fn new(selector: impl Into<Selector>, arguments: Arguments) -> Self {
        Self {
            selector: selector.into(),
            arguments,
        }
    }

    /// Message without arguments.
    pub fn unit(selector: impl Into<Selector>) -> Self {
        Self::new(selector, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DID_SCROLL: Selector = Selector::from_static("scrollViewDidScroll:");

    #[test]
    fn test_static_and_owned_selectors_compare_equal() {
        let owned = Selector::new(String::from("scrollViewDidScroll:"));
        assert_eq!(DID_SCROLL, owned);
        assert_eq!(DID_SCROLL.to_string(), "scrollViewDidScroll:");
    }

    #[test]
    fn test_unit_message_has_no_arguments() {
        let message = Message::unit("viewDidShow");
        assert_eq!(message.selector.as_str(), "viewDidShow");
        assert!(message.arguments.is_empty());
    }
}
