use std::collections::BTreeMap;

/// Unauthenticated entry screen.
pub const LOGIN: &str = "Login";
pub const PROFILE: &str = "Profile";
pub const TASK: &str = "Task";

/// Extra values passed along with a destination.
pub type RouteParams = BTreeMap<String, String>;

/// One entry in the navigation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    pub params: Option<RouteParams>,
}

impl Route {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
        }
    }

    #[cfg(test)]
    pub fn with_params(name: impl Into<String>, params: RouteParams) -> Self {
        Self {
            name: name.into(),
            params: Some(params),
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.as_ref()?.get(key).map(String::as_str)
    }
}

/// The navigation primitives screens are allowed to use.
pub trait NavigationHost {
    fn navigate_to(&mut self, destination: &str, params: Option<RouteParams>);

    /// Replace the whole history with a single entry.
    fn reset_to(&mut self, destination: &str);
}

/// Stack-based navigator.
///
/// `navigate_to` a route already in the history pops back to it and replaces
/// its params instead of pushing a duplicate.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new(initial: &str) -> Self {
        Self {
            stack: vec![Route::new(initial)],
        }
    }

    pub fn current(&self) -> &Route {
        // The stack is never empty: constructors seed one entry and go_back keeps it
        &self.stack[self.stack.len() - 1]
    }

    pub fn history(&self) -> &[Route] {
        &self.stack
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stack.iter().any(|r| r.name == name)
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Pop the current route. Returns false at the root.
    pub fn go_back(&mut self) -> bool {
        if self.can_go_back() {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}

impl NavigationHost for Navigator {
    fn navigate_to(&mut self, destination: &str, params: Option<RouteParams>) {
        if let Some(pos) = self.stack.iter().position(|r| r.name == destination) {
            self.stack.truncate(pos + 1);
            self.stack[pos].params = params;
        } else {
            self.stack.push(Route {
                name: destination.to_string(),
                params,
            });
        }
        tracing::debug!(destination, depth = self.stack.len(), "navigated");
    }

    fn reset_to(&mut self, destination: &str) {
        self.stack.clear();
        self.stack.push(Route::new(destination));
        tracing::debug!(destination, "navigation reset");
    }
}
