// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! The proxy that stands in for a host object's real delegate.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::core::config::ReinstallPolicy;
use crate::core::delegates::{Delegate, DelegateRef, same_delegate};
use crate::core::error::Result;
use crate::core::message::{Arguments, Message, Selector};
use crate::core::runtime::Lifetime;
use crate::core::stream::Subject;

/// Re-applies a proxy as its host's visible delegate.
pub type ReinstallFn = Box<dyn Fn(&Arc<DelegateProxy>) -> Result<()> + Send + Sync>;

/// Delegate installed in place of the real delegate of one host slot.
///
/// Intercepted selectors are answered by the proxy itself: every delivery
/// is published to that selector's subscribers and then forwarded to the
/// real delegate if it implements it. Everything else goes straight to the
/// real delegate, which is held weakly; whoever assigned it keeps it alive.
pub struct DelegateProxy {
    this: Weak<DelegateProxy>,
    forwardee: RwLock<Option<Weak<dyn Delegate>>>,
    intercepted: RwLock<BTreeSet<Selector>>,
    subjects: Mutex<HashMap<Selector, Arc<Subject<Arguments>>>>,
    reinstall: ReinstallFn,
    policy: ReinstallPolicy,
    lifetime: Lifetime,
}

impl DelegateProxy {
    /// Create a proxy bound to `lifetime`, the lifetime of its host object.
    pub fn new(lifetime: Lifetime, policy: ReinstallPolicy, reinstall: ReinstallFn) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            forwardee: RwLock::new(None),
            intercepted: RwLock::new(BTreeSet::new()),
            subjects: Mutex::new(HashMap::new()),
            reinstall,
            policy,
            lifetime,
        })
    }

    /// The real delegate, if set and still alive.
    pub fn forwardee(&self) -> Option<DelegateRef> {
        self.forwardee.read().as_ref().and_then(Weak::upgrade)
    }

    /// Replace the real delegate and re-apply the proxy to its host.
    ///
    /// Assigning the proxy to itself, directly or wrapped in another `Arc`,
    /// leaves the forwardee unchanged. Cycles through other proxies are not
    /// detected and must not be built.
    pub fn set_forwardee(&self, delegate: Option<DelegateRef>) -> Result<()> {
        match delegate {
            Some(delegate) if same_delegate(delegate.as_ref(), self) => {
                tracing::debug!("[DelegateProxy] Ignoring assignment of proxy to itself");
            }
            delegate => {
                *self.forwardee.write() = delegate.as_ref().map(Arc::downgrade);
            }
        }
        self.reinstall()
    }

    /// Answer `selector` locally from now on. Idempotent; never removed.
    pub fn intercept(&self, selector: impl Into<Selector>) -> Result<()> {
        let selector = selector.into();
        let inserted = self.intercepted.write().insert(selector.clone());
        if inserted {
            tracing::debug!("[DelegateProxy] Intercepting `{}`", selector);
        }

        match (self.policy, inserted) {
            (ReinstallPolicy::WhenChanged, false) => Ok(()),
            _ => self.reinstall(),
        }
    }

    pub fn is_intercepted(&self, selector: &Selector) -> bool {
        self.intercepted.read().contains(selector)
    }

    /// Intercepted selectors, sorted.
    pub fn intercepted_selectors(&self) -> Vec<Selector> {
        self.intercepted.read().iter().cloned().collect()
    }

    /// Subject publishing the arguments of every delivery of `selector`.
    ///
    /// Created on first use; completed when the host object is dropped.
    pub fn subject(&self, selector: &Selector) -> Arc<Subject<Arguments>> {
        let mut subjects = self.subjects.lock();
        if let Some(subject) = subjects.get(selector) {
            return Arc::clone(subject);
        }

        let subject = Arc::new(Subject::new());
        subjects.insert(selector.clone(), Arc::clone(&subject));
        drop(subjects);

        let completing = Arc::clone(&subject);
        self.lifetime.observe_ended(move || completing.complete());
        subject
    }

    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    fn reinstall(&self) -> Result<()> {
        match self.this.upgrade() {
            Some(this) => (self.reinstall)(&this),
            None => Ok(()),
        }
    }

    fn publish(&self, message: &Message) {
        let subject = self.subjects.lock().get(&message.selector).cloned();
        if let Some(subject) = subject {
            let delivered = subject.send(&message.arguments);
            tracing::trace!(
                "[DelegateProxy] `{}` delivered to {} subscribers",
                message.selector,
                delivered
            );
        }
    }
}

impl Delegate for DelegateProxy {
    fn responds_to(&self, selector: &Selector) -> bool {
        if self.is_intercepted(selector) {
            return true;
        }
        self.forwardee()
            .is_some_and(|forwardee| forwardee.responds_to(selector))
    }

    fn forwarding_target(&self, selector: &Selector) -> Option<DelegateRef> {
        if self.is_intercepted(selector) {
            return None;
        }
        self.forwardee()
    }

    fn receive(&self, message: &Message) -> Result<serde_json::Value> {
        if self.is_intercepted(&message.selector) {
            self.publish(message);
        }

        match self.forwardee() {
            Some(forwardee) if forwardee.responds_to(&message.selector) => {
                forwardee.receive(message)
            }
            _ => Ok(serde_json::Value::Null),
        }
    }
}

impl std::fmt::Debug for DelegateProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateProxy")
            .field("intercepted", &*self.intercepted.read())
            .field("has_forwardee", &self.forwardee().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::delegates::{HandlerDelegate, dispatch};
    use crate::core::stream::Next;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_proxy(policy: ReinstallPolicy) -> (Arc<DelegateProxy>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let proxy = DelegateProxy::new(
            Lifetime::new(),
            policy,
            Box::new(move |_: &Arc<DelegateProxy>| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );
        (proxy, count)
    }

    fn ending_delegate() -> DelegateRef {
        Arc::new(HandlerDelegate::new().on("didEndDragging", |_| Ok(json!("ended"))))
    }

    #[test]
    fn test_absent_forwardee_responds_to_nothing() {
        let (proxy, _) = counting_proxy(ReinstallPolicy::Always);

        assert!(!proxy.responds_to(&"didEndDragging".into()));
        assert!(proxy.forwarding_target(&"didEndDragging".into()).is_none());
        assert_eq!(proxy.receive(&Message::unit("didEndDragging")).unwrap(), json!(null));
    }

    #[test]
    fn test_forwards_non_intercepted_selectors() {
        let (proxy, _) = counting_proxy(ReinstallPolicy::Always);
        let delegate = ending_delegate();
        proxy.set_forwardee(Some(Arc::clone(&delegate))).unwrap();

        assert!(proxy.responds_to(&"didEndDragging".into()));
        assert!(!proxy.responds_to(&"didScroll".into()));
        let target = proxy.forwarding_target(&"didEndDragging".into()).unwrap();
        assert!(Arc::ptr_eq(&target, &delegate));
        assert_eq!(
            dispatch(proxy.as_ref(), &Message::unit("didEndDragging")).unwrap(),
            Some(json!("ended"))
        );
    }

    #[test]
    fn test_intercepted_selector_handled_locally() {
        let (proxy, _) = counting_proxy(ReinstallPolicy::Always);
        let delegate = ending_delegate();
        proxy.set_forwardee(Some(delegate)).unwrap();
        proxy.intercept("didScroll").unwrap();
        let events = proxy.subject(&"didScroll".into()).subscribe();

        assert!(proxy.responds_to(&"didScroll".into()));
        assert!(proxy.forwarding_target(&"didScroll".into()).is_none());

        let reply = dispatch(proxy.as_ref(), &Message::new("didScroll", vec![json!(12.5)]));
        assert_eq!(reply.unwrap(), Some(json!(null)));
        assert_eq!(events.try_next(), Next::Value(vec![json!(12.5)]));
    }

    #[test]
    fn test_intercepted_selector_still_reaches_implementing_delegate() {
        let (proxy, _) = counting_proxy(ReinstallPolicy::Always);
        proxy.set_forwardee(Some(ending_delegate())).unwrap();
        proxy.intercept("didEndDragging").unwrap();
        let events = proxy.subject(&"didEndDragging".into()).subscribe();

        let reply = dispatch(proxy.as_ref(), &Message::unit("didEndDragging")).unwrap();
        assert_eq!(reply, Some(json!("ended")));
        assert_eq!(events.try_next(), Next::Value(vec![]));
    }

    #[test]
    fn test_forwardee_is_weak() {
        let (proxy, _) = counting_proxy(ReinstallPolicy::Always);
        let delegate = ending_delegate();
        proxy.set_forwardee(Some(Arc::clone(&delegate))).unwrap();
        assert!(proxy.forwardee().is_some());

        drop(delegate);
        assert!(proxy.forwardee().is_none());
        assert!(!proxy.responds_to(&"didEndDragging".into()));
    }

    #[test]
    fn test_structural_changes_reinstall() {
        let (proxy, count) = counting_proxy(ReinstallPolicy::Always);

        proxy.set_forwardee(Some(ending_delegate())).unwrap();
        proxy.intercept("didScroll").unwrap();
        proxy.intercept("didScroll").unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(proxy.intercepted_selectors(), vec![Selector::from("didScroll")]);
    }

    #[test]
    fn test_when_changed_policy_skips_redundant_intercept() {
        let (proxy, count) = counting_proxy(ReinstallPolicy::WhenChanged);

        proxy.intercept("didScroll").unwrap();
        proxy.intercept("didScroll").unwrap();
        proxy.set_forwardee(None).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_assigning_proxy_to_itself_keeps_forwardee() {
        let (proxy, _) = counting_proxy(ReinstallPolicy::Always);
        let delegate = ending_delegate();
        proxy.set_forwardee(Some(Arc::clone(&delegate))).unwrap();

        let as_delegate: DelegateRef = proxy.clone();
        proxy.set_forwardee(Some(as_delegate)).unwrap();

        let forwardee = proxy.forwardee().unwrap();
        assert!(Arc::ptr_eq(&forwardee, &delegate));
    }

    #[test]
    fn test_assigning_wrapped_proxy_keeps_forwardee() {
        let (proxy, _) = counting_proxy(ReinstallPolicy::Always);
        let delegate = ending_delegate();
        proxy.set_forwardee(Some(Arc::clone(&delegate))).unwrap();

        let as_delegate: DelegateRef = proxy.clone();
        let wrapped: DelegateRef = Arc::new(as_delegate);
        proxy.set_forwardee(Some(wrapped)).unwrap();

        assert!(Arc::ptr_eq(&proxy.forwardee().unwrap(), &delegate));
        assert!(!proxy.responds_to(&"didScroll".into()));
        assert!(proxy.responds_to(&"didEndDragging".into()));
    }

    #[test]
    fn test_subject_completes_with_lifetime() {
        let lifetime = Lifetime::new();
        let proxy = DelegateProxy::new(lifetime.clone(), ReinstallPolicy::Always, Box::new(|_: &Arc<DelegateProxy>| Ok(())));
        proxy.intercept("didShow").unwrap();
        let events = proxy.subject(&"didShow".into()).subscribe();

        lifetime.end();
        assert_eq!(events.try_next(), Next::Completed);
    }
}
