use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PointsError {
    #[error("Points database error: {0}")]
    Database(#[from] turso::Error),

    #[error("Points source unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can report a user's accumulated point total.
#[async_trait(?Send)]
pub trait PointsSource {
    async fn get_points(&self, user_id: &str) -> Result<i64, PointsError>;
}

/// Stands in for a ledger that could not be opened. Every lookup fails, so
/// the profile keeps its current total instead of the app refusing to start.
#[derive(Debug, Clone)]
pub struct UnavailablePoints {
    reason: String,
}

impl UnavailablePoints {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait(?Send)]
impl PointsSource for UnavailablePoints {
    async fn get_points(&self, _user_id: &str) -> Result<i64, PointsError> {
        Err(PointsError::Unavailable(self.reason.clone()))
    }
}
