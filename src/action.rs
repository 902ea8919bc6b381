//! Permission actions and the default HTTP method mapping.

use std::borrow::Cow;
use std::fmt;

use axum::http::Method;

use crate::constants::actions;

/// Symbolic name of the permission checked for an HTTP method
/// (`show`, `create`, `update`, `destroy`, or anything the host defines).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action(Cow<'static, str>);

impl Action {
    pub const SHOW: Action = Action(Cow::Borrowed(actions::SHOW));
    pub const CREATE: Action = Action(Cow::Borrowed(actions::CREATE));
    pub const UPDATE: Action = Action(Cow::Borrowed(actions::UPDATE));
    pub const DESTROY: Action = Action(Cow::Borrowed(actions::DESTROY));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Action {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl PartialEq<str> for Action {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Action {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Permission action implied by an HTTP method.
///
/// Returns `None` for methods outside HEAD/GET/POST/PUT/PATCH/DELETE; such
/// rules are carried through and end up denied.
pub fn default_action_for(method: &Method) -> Option<Action> {
    match method.as_str() {
        "HEAD" | "GET" => Some(Action::SHOW),
        "POST" => Some(Action::CREATE),
        "PUT" | "PATCH" => Some(Action::UPDATE),
        "DELETE" => Some(Action::DESTROY),
        _ => None,
    }
}
