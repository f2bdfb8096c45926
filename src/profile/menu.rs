use crate::navigation::TASK;

pub const LOGOUT: &str = "Logout";

/// A fixed row in the profile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub destination: &'static str,
}

/// Rendered top to bottom; logout stays last.
pub static MENU: [MenuEntry; 7] = [
    MenuEntry {
        label: "All Completed Tasks",
        destination: TASK,
    },
    MenuEntry {
        label: "Rewards",
        destination: "Rewards",
    },
    MenuEntry {
        label: "Leaderboard",
        destination: "Leaderboard",
    },
    MenuEntry {
        label: "Notifications",
        destination: "Notifications",
    },
    MenuEntry {
        label: "Preferences & Settings",
        destination: "Settings",
    },
    MenuEntry {
        label: "Referral",
        destination: "Referral",
    },
    MenuEntry {
        label: "Logout",
        destination: LOGOUT,
    },
];
