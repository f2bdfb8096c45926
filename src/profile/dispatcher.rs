use super::menu::LOGOUT;
use crate::navigation::{LOGIN, NavigationHost, RouteParams, TASK};
use crate::session::SessionStore;

pub const INITIAL_TAB_PARAM: &str = "initialTab";
pub const VICTORY_LAP_TAB: &str = "victorylap";

/// What selecting a menu destination does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Drop the stored session and restart at the login screen.
    Logout,
    Navigate {
        destination: String,
        params: Option<RouteParams>,
    },
}

pub fn resolve(destination: &str) -> MenuAction {
    match destination {
        LOGOUT => MenuAction::Logout,
        TASK => {
            let mut params = RouteParams::new();
            params.insert(INITIAL_TAB_PARAM.to_string(), VICTORY_LAP_TAB.to_string());
            MenuAction::Navigate {
                destination: TASK.to_string(),
                params: Some(params),
            }
        }
        other => MenuAction::Navigate {
            destination: other.to_string(),
            params: None,
        },
    }
}

/// Resolve and perform the action for `destination`.
///
/// Logout awaits the store clear before touching navigation. A failed clear is
/// logged and the reset still happens so the user always lands on login.
pub async fn dispatch(
    destination: &str,
    session: &dyn SessionStore,
    nav: &mut dyn NavigationHost,
) -> MenuAction {
    let action = resolve(destination);
    match &action {
        MenuAction::Logout => {
            if let Err(e) = session.clear().await {
                tracing::error!(error = %e, "failed to clear session on logout");
            } else {
                tracing::info!("signed out");
            }
            nav.reset_to(LOGIN);
        }
        MenuAction::Navigate {
            destination,
            params,
        } => {
            nav.navigate_to(destination, params.clone());
        }
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{PROFILE, Route};
    use crate::profile::menu::MENU;
    use crate::testing::{Call, CallLog, FakeSessionStore, RecordingNavigator};
    use proptest::prelude::*;

    const SIGNED_IN: &str = r#"{"id":"u1","name":"Ann"}"#;

    fn victory_lap() -> RouteParams {
        let mut params = RouteParams::new();
        params.insert("initialTab".to_string(), "victorylap".to_string());
        params
    }

    #[tokio::test]
    async fn test_logout_clears_before_reset() {
        let log = CallLog::default();
        let session = FakeSessionStore::new(Some(SIGNED_IN), log.clone());
        let mut nav = RecordingNavigator::new(PROFILE, log.clone());
        nav.inner.navigate_to("Rewards", None);
        nav.inner.go_back();

        let action = dispatch(LOGOUT, &session, &mut nav).await;

        assert_eq!(action, MenuAction::Logout);
        let clear = log.position(&Call::SessionClear).unwrap();
        let reset = log.position(&Call::ResetTo(LOGIN.to_string())).unwrap();
        assert!(clear < reset);
        assert_eq!(session.stored(), None);
        assert_eq!(nav.inner.history(), &[Route::new(LOGIN)]);
        assert!(!nav.inner.can_go_back());
    }

    #[tokio::test]
    async fn test_logout_resets_even_when_clear_fails() {
        let log = CallLog::default();
        let session = FakeSessionStore::failing_clear(Some(SIGNED_IN), log.clone());
        let mut nav = RecordingNavigator::new(PROFILE, log.clone());

        dispatch(LOGOUT, &session, &mut nav).await;

        assert_eq!(log.calls(), vec![Call::SessionClear, Call::ResetTo(LOGIN.to_string())]);
        assert_eq!(nav.inner.history(), &[Route::new(LOGIN)]);
    }

    #[tokio::test]
    async fn test_completed_tasks_opens_victory_lap() {
        let log = CallLog::default();
        let session = FakeSessionStore::new(Some(SIGNED_IN), log.clone());
        let mut nav = RecordingNavigator::new(PROFILE, log.clone());
        let entry = MENU.iter().find(|e| e.label == "All Completed Tasks").unwrap();

        dispatch(entry.destination, &session, &mut nav).await;

        assert_eq!(
            log.calls(),
            vec![Call::NavigateTo(TASK.to_string(), Some(victory_lap()))]
        );
        assert_eq!(session.stored().as_deref(), Some(SIGNED_IN));
        assert_eq!(nav.inner.current().param("initialTab"), Some("victorylap"));
    }

    #[tokio::test]
    async fn test_plain_destination_has_no_params() {
        let log = CallLog::default();
        let session = FakeSessionStore::new(Some(SIGNED_IN), log.clone());
        let mut nav = RecordingNavigator::new(PROFILE, log.clone());

        dispatch("Rewards", &session, &mut nav).await;

        assert_eq!(log.calls(), vec![Call::NavigateTo("Rewards".to_string(), None)]);
        assert_eq!(nav.inner.current(), &Route::new("Rewards"));
    }

    #[test]
    fn test_every_menu_entry_resolves() {
        for entry in MENU.iter() {
            match resolve(entry.destination) {
                MenuAction::Logout => assert_eq!(entry.label, "Logout"),
                MenuAction::Navigate { destination, .. } => {
                    assert_eq!(destination, entry.destination)
                }
            }
        }
    }

    proptest! {
        #[test]
        fn prop_other_destinations_navigate_by_name(name in "[A-Za-z]{1,16}") {
            prop_assume!(name != LOGOUT && name != TASK);
            prop_assert_eq!(
                resolve(&name),
                MenuAction::Navigate { destination: name.clone(), params: None }
            );
        }
    }
}
