//! Request scope: the in-flight request state rules are evaluated against.
//!
//! Resource overrides, the implicit-resource strategy and the authorization
//! predicate all receive the scope explicitly. The scope also exposes the two
//! ambient slots the resolver falls back to when nothing else yields a
//! resource.

use std::collections::HashMap;

/// In-flight request state visible to rule evaluation.
pub trait RequestScope {
    /// Resource type authorization is checked against.
    type Resource: Clone;

    /// Resource the handler explicitly nominated for the Allow computation.
    /// Highest-priority ambient fallback.
    fn explicit_resource(&self) -> Option<&Self::Resource> {
        None
    }

    /// Resource the handler is working on. Lowest-priority fallback.
    fn current_resource(&self) -> Option<&Self::Resource> {
        None
    }
}

/// Ready-made scope for hosts without a handler object of their own.
///
/// Besides the two ambient slots it carries named instance slots, which
/// resource overrides can read (`slots.instance("document")`).
#[derive(Debug, Clone)]
pub struct ResourceSlots<R> {
    explicit: Option<R>,
    current: Option<R>,
    instances: HashMap<String, R>,
}

impl<R> Default for ResourceSlots<R> {
    fn default() -> Self {
        Self {
            explicit: None,
            current: None,
            instances: HashMap::new(),
        }
    }
}

impl<R> ResourceSlots<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_explicit(&mut self, resource: R) {
        self.explicit = Some(resource);
    }

    pub fn set_current(&mut self, resource: R) {
        self.current = Some(resource);
    }

    pub fn set_instance(&mut self, name: impl Into<String>, resource: R) {
        self.instances.insert(name.into(), resource);
    }

    pub fn instance(&self, name: &str) -> Option<&R> {
        self.instances.get(name)
    }

    pub fn with_explicit(mut self, resource: R) -> Self {
        self.set_explicit(resource);
        self
    }

    pub fn with_current(mut self, resource: R) -> Self {
        self.set_current(resource);
        self
    }

    pub fn with_instance(mut self, name: impl Into<String>, resource: R) -> Self {
        self.set_instance(name, resource);
        self
    }
}

impl<R: Clone> RequestScope for ResourceSlots<R> {
    type Resource = R;

    fn explicit_resource(&self) -> Option<&R> {
        self.explicit.as_ref()
    }

    fn current_resource(&self) -> Option<&R> {
        self.current.as_ref()
    }
}
