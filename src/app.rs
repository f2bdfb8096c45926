use crate::navigation::{LOGIN, NavigationHost, Navigator, PROFILE, Route, TASK};
use crate::points::PointsSource;
use crate::profile::dispatcher::{INITIAL_TAB_PARAM, VICTORY_LAP_TAB};
use crate::profile::{MENU, MenuAction, ProfileScreen, ScreenState, dispatch};
use crate::session::{SessionRecord, SessionStore, current_session};
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::watch;

/// Which kind of view the current route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Profile,
    Destination,
}

/// Tabs on the task screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTab {
    Ongoing,
    VictoryLap,
}

impl TaskTab {
    pub fn next(self) -> Self {
        match self {
            Self::Ongoing => Self::VictoryLap,
            Self::VictoryLap => Self::Ongoing,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ongoing => "Ongoing",
            Self::VictoryLap => "Victory Lap",
        }
    }

    /// Tab selected by the route's `initialTab` param.
    pub fn from_route(route: &Route) -> Self {
        match route.param(INITIAL_TAB_PARAM) {
            Some(VICTORY_LAP_TAB) => Self::VictoryLap,
            _ => Self::Ongoing,
        }
    }

    pub const ALL: [TaskTab; 2] = [Self::Ongoing, Self::VictoryLap];
}

/// Field focus on the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    UserId,
    Name,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub user_id: String,
    pub name: String,
    pub focus: LoginField,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            user_id: String::new(),
            name: String::new(),
            focus: LoginField::UserId,
            error: None,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::UserId => LoginField::Name,
            LoginField::Name => LoginField::UserId,
        };
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::UserId => &mut self.user_id,
            LoginField::Name => &mut self.name,
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application state.
pub struct App {
    session: Rc<dyn SessionStore>,
    points: Rc<dyn PointsSource>,
    pub nav: Navigator,
    pub should_quit: bool,
    pub show_help: bool,

    // Profile screen, mounted while its route is in the history
    profile: Option<ProfileScreen>,
    profile_changes: Option<watch::Receiver<ScreenState>>,
    pub menu_selected: usize,
    pub institution: String,

    pub login: LoginForm,
    pub task_tab: TaskTab,
    last_route: Option<Route>,

    // Status message
    pub status_msg: String,
}

impl App {
    pub fn new(
        session: Rc<dyn SessionStore>,
        points: Rc<dyn PointsSource>,
        initial_route: &str,
        institution: String,
    ) -> Self {
        Self {
            session,
            points,
            nav: Navigator::new(initial_route),
            should_quit: false,
            show_help: false,

            profile: None,
            profile_changes: None,
            menu_selected: 0,
            institution,

            login: LoginForm::new(),
            task_tab: TaskTab::Ongoing,
            last_route: None,

            status_msg: String::new(),
        }
    }

    /// Build the app, starting on the profile when a usable session exists.
    ///
    /// Must be called from within a `tokio::task::LocalSet`.
    pub async fn start(
        session: Rc<dyn SessionStore>,
        points: Rc<dyn PointsSource>,
        institution: String,
    ) -> Self {
        let initial = match current_session(session.as_ref()).await {
            Some(record) => {
                tracing::info!(user_id = %record.id, "resuming stored session");
                PROFILE
            }
            None => LOGIN,
        };
        let mut app = Self::new(session, points, initial, institution);
        app.sync_screens();
        app
    }

    pub fn screen(&self) -> Screen {
        match self.nav.current().name.as_str() {
            LOGIN => Screen::Login,
            PROFILE => Screen::Profile,
            _ => Screen::Destination,
        }
    }

    /// Reconcile mounted screens with the navigation history.
    ///
    /// The profile mounts when its route enters the history, is active only
    /// while it is the current route, and unmounts when it leaves.
    pub fn sync_screens(&mut self) {
        let in_history = self.nav.contains(PROFILE);
        let on_top = self.nav.current().name == PROFILE;

        if !in_history {
            if self.profile.take().is_some() {
                tracing::debug!("profile unmounted");
            }
            self.profile_changes = None;
        } else if self.profile.is_none() {
            let screen = ProfileScreen::mount(Rc::clone(&self.session), Rc::clone(&self.points));
            self.profile_changes = Some(screen.subscribe());
            self.profile = Some(screen);
            self.menu_selected = 0;
            tracing::debug!("profile mounted");
        }

        if let Some(profile) = self.profile.as_mut() {
            if on_top && !profile.is_active() {
                // The handle is dropped; the task keeps running on the local set
                let _ = profile.activate();
            } else if !on_top && profile.is_active() {
                profile.deactivate();
            }
        }

        let current = self.nav.current().clone();
        if self.last_route.as_ref() != Some(&current) {
            if current.name == TASK {
                self.task_tab = TaskTab::from_route(&current);
            }
            self.last_route = Some(current);
        }
    }

    #[cfg(test)]
    pub fn is_profile_mounted(&self) -> bool {
        self.profile.is_some()
    }

    /// Latest profile state, or the empty state when not mounted.
    pub fn profile_state(&self) -> ScreenState {
        self.profile
            .as_ref()
            .map(ProfileScreen::state)
            .unwrap_or_default()
    }

    /// Sleep up to `tick`, waking early when the profile state changes.
    pub async fn wait_for_update(&mut self, tick: Duration) {
        match self.profile_changes.as_mut() {
            Some(rx) => match tokio::time::timeout(tick, rx.changed()).await {
                Ok(Ok(())) => {
                    rx.borrow_and_update();
                }
                Ok(Err(_)) => tokio::time::sleep(tick).await,
                Err(_) => {}
            },
            None => tokio::time::sleep(tick).await,
        }
    }

    pub fn menu_next(&mut self) {
        if self.menu_selected + 1 < MENU.len() {
            self.menu_selected += 1;
        }
    }

    pub fn menu_prev(&mut self) {
        self.menu_selected = self.menu_selected.saturating_sub(1);
    }

    /// Dispatch the menu entry at `index`.
    pub async fn select_menu(&mut self, index: usize) {
        let Some(entry) = MENU.get(index) else {
            return;
        };
        self.menu_selected = index;
        let action = dispatch(entry.destination, self.session.as_ref(), &mut self.nav).await;
        match action {
            MenuAction::Logout => {
                self.login = LoginForm::new();
                self.status_msg = "Signed out".to_string();
            }
            MenuAction::Navigate { .. } => {
                self.status_msg.clear();
            }
        }
        self.sync_screens();
    }

    pub async fn select_current(&mut self) {
        self.select_menu(self.menu_selected).await;
    }

    /// Persist the login form as the session record and open the profile.
    pub async fn submit_login(&mut self) {
        let user_id = self.login.user_id.trim();
        if user_id.is_empty() {
            self.login.error = Some("User id is required".to_string());
            return;
        }
        let name = self.login.name.trim();
        let record = SessionRecord::new(
            user_id,
            (!name.is_empty()).then(|| name.to_string()),
        );

        let stored = match record.to_json() {
            Ok(json) => self.session.set(&json).await,
            Err(e) => Err(e),
        };
        if let Err(e) = stored {
            tracing::error!(error = %e, "failed to store session");
            self.login.error = Some(format!("Could not save session: {e}"));
            return;
        }

        tracing::info!(user_id = %record.id, "signed in");
        self.login = LoginForm::new();
        self.status_msg.clear();
        self.nav.reset_to(PROFILE);
        self.sync_screens();
    }

    pub fn go_back(&mut self) {
        if self.nav.go_back() {
            self.sync_screens();
        }
    }
}
