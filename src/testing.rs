//! In-memory collaborators for tests. They append to a shared call log so
//! tests can assert on cross-collaborator ordering.

use crate::navigation::{NavigationHost, Navigator, RouteParams};
use crate::points::{PointsError, PointsSource};
use crate::session::{SessionError, SessionStore};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SessionGet,
    SessionSet(String),
    SessionClear,
    Points(String),
    NavigateTo(String, Option<RouteParams>),
    ResetTo(String),
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.0.borrow().iter().position(|c| c == call)
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }
}

pub struct FakeSessionStore {
    record: RefCell<Option<String>>,
    pub fail_clear: bool,
    log: CallLog,
}

impl FakeSessionStore {
    pub fn new(record: Option<&str>, log: CallLog) -> Self {
        Self {
            record: RefCell::new(record.map(str::to_string)),
            fail_clear: false,
            log,
        }
    }

    pub fn failing_clear(record: Option<&str>, log: CallLog) -> Self {
        Self {
            fail_clear: true,
            ..Self::new(record, log)
        }
    }

    pub fn stored(&self) -> Option<String> {
        self.record.borrow().clone()
    }
}

#[async_trait(?Send)]
impl SessionStore for FakeSessionStore {
    async fn get(&self) -> Result<Option<String>, SessionError> {
        self.log.push(Call::SessionGet);
        Ok(self.record.borrow().clone())
    }

    async fn set(&self, serialized: &str) -> Result<(), SessionError> {
        self.log.push(Call::SessionSet(serialized.to_string()));
        *self.record.borrow_mut() = Some(serialized.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.log.push(Call::SessionClear);
        if self.fail_clear {
            return Err(SessionError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only storage",
            )));
        }
        *self.record.borrow_mut() = None;
        Ok(())
    }
}

pub struct FakePoints {
    totals: RefCell<HashMap<String, i64>>,
    pub fail: bool,
    /// When set, every lookup waits for a notification before answering.
    pub gate: Option<Rc<Notify>>,
    log: CallLog,
}

impl FakePoints {
    pub fn new(totals: &[(&str, i64)], log: CallLog) -> Self {
        Self {
            totals: RefCell::new(
                totals
                    .iter()
                    .map(|(id, points)| (id.to_string(), *points))
                    .collect(),
            ),
            fail: false,
            gate: None,
            log,
        }
    }

    pub fn failing(log: CallLog) -> Self {
        Self {
            fail: true,
            ..Self::new(&[], log)
        }
    }

    pub fn gated(totals: &[(&str, i64)], gate: Rc<Notify>, log: CallLog) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(totals, log)
        }
    }

    pub fn set_total(&self, user_id: &str, points: i64) {
        self.totals.borrow_mut().insert(user_id.to_string(), points);
    }
}

#[async_trait(?Send)]
impl PointsSource for FakePoints {
    async fn get_points(&self, user_id: &str) -> Result<i64, PointsError> {
        self.log.push(Call::Points(user_id.to_string()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(PointsError::Unavailable("connection refused".to_string()));
        }
        Ok(self.totals.borrow().get(user_id).copied().unwrap_or(0))
    }
}

/// A real `Navigator` that also records every call.
pub struct RecordingNavigator {
    pub inner: Navigator,
    log: CallLog,
}

impl RecordingNavigator {
    pub fn new(initial: &str, log: CallLog) -> Self {
        Self {
            inner: Navigator::new(initial),
            log,
        }
    }
}

impl NavigationHost for RecordingNavigator {
    fn navigate_to(&mut self, destination: &str, params: Option<RouteParams>) {
        self.log
            .push(Call::NavigateTo(destination.to_string(), params.clone()));
        self.inner.navigate_to(destination, params);
    }

    fn reset_to(&mut self, destination: &str) {
        self.log.push(Call::ResetTo(destination.to_string()));
        self.inner.reset_to(destination);
    }
}
