//! The profile screen: session-backed header, points total and the menu.

pub mod dispatcher;
pub mod loader;
pub mod menu;

pub use dispatcher::{MenuAction, dispatch};
pub use loader::{LoadOutcome, ScreenState, load_profile};
pub use menu::MENU;

use crate::points::PointsSource;
use crate::session::SessionStore;
use std::rc::Rc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A mounted profile screen.
///
/// State starts at `{ "", 0 }` on mount. Each activation spawns one loader
/// on the local task set; deactivating or dropping the screen cancels it.
pub struct ProfileScreen {
    session: Rc<dyn SessionStore>,
    points: Rc<dyn PointsSource>,
    state: Rc<watch::Sender<ScreenState>>,
    activation: Option<CancellationToken>,
}

impl ProfileScreen {
    pub fn mount(session: Rc<dyn SessionStore>, points: Rc<dyn PointsSource>) -> Self {
        let (state, _) = watch::channel(ScreenState::default());
        Self {
            session,
            points,
            state: Rc::new(state),
            activation: None,
        }
    }

    /// Start loading. Returns `None` if the screen is already active.
    ///
    /// Must be called from within a `tokio::task::LocalSet`.
    pub fn activate(&mut self) -> Option<JoinHandle<LoadOutcome>> {
        if self.is_active() {
            return None;
        }

        let token = CancellationToken::new();
        self.activation = Some(token.clone());

        let session = Rc::clone(&self.session);
        let points = Rc::clone(&self.points);
        let state = Rc::clone(&self.state);
        Some(tokio::task::spawn_local(async move {
            let outcome = load_profile(session.as_ref(), points.as_ref(), &state, &token).await;
            tracing::debug!(?outcome, "profile load finished");
            outcome
        }))
    }

    pub fn deactivate(&mut self) {
        if let Some(token) = self.activation.take() {
            token.cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_some()
    }

    pub fn state(&self) -> ScreenState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState> {
        self.state.subscribe()
    }
}

impl Drop for ProfileScreen {
    fn drop(&mut self) {
        self.deactivate();
    }
}
