use crate::points::PointsSource;
use crate::session::{SessionStore, current_session};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// What the profile screen renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    pub display_name: String,
    pub point_total: i64,
}

/// Which path a load took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No usable session record; state left untouched.
    SignedOut,
    /// Name and points published.
    Loaded,
    /// Name published, points lookup failed; previous total kept.
    PointsUnavailable,
    /// The activation ended before the load could publish.
    Abandoned,
}

/// Populate `state` from the stored session and the points source.
///
/// Every publish is skipped once `activation` is cancelled, so a load that
/// outlives its screen never writes into it.
pub async fn load_profile(
    session: &dyn SessionStore,
    points: &dyn PointsSource,
    state: &watch::Sender<ScreenState>,
    activation: &CancellationToken,
) -> LoadOutcome {
    let Some(record) = current_session(session).await else {
        tracing::debug!("no stored session; profile stays empty");
        return LoadOutcome::SignedOut;
    };

    if activation.is_cancelled() {
        return LoadOutcome::Abandoned;
    }
    let name = record.display_name().to_string();
    state.send_if_modified(|s| {
        if s.display_name == name {
            false
        } else {
            s.display_name = name;
            true
        }
    });

    match points.get_points(&record.id).await {
        Ok(total) => {
            if activation.is_cancelled() {
                tracing::debug!(user_id = %record.id, "profile inactive; dropping points result");
                return LoadOutcome::Abandoned;
            }
            state.send_if_modified(|s| {
                if s.point_total == total {
                    false
                } else {
                    s.point_total = total;
                    true
                }
            });
            LoadOutcome::Loaded
        }
        Err(e) => {
            tracing::warn!(user_id = %record.id, error = %e, "points lookup failed; keeping previous total");
            LoadOutcome::PointsUnavailable
        }
    }
}
