use crate::points::{PointsError, PointsSource, UnavailablePoints};
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use std::rc::Rc;
use turso::Value;

/// A single ledger row from the `point_awards` table.
#[derive(Debug, Clone)]
pub struct PointAward {
    pub user_id: String,
    pub points: i64,
    pub reason: String,
    pub awarded_at: String,
}

// ── Value extraction helpers ──

fn val_i64(v: &Value) -> i64 {
    match v {
        Value::Integer(i) => *i,
        Value::Real(f) => *f as i64,
        _ => 0,
    }
}

fn val_string(v: &Value) -> String {
    match v {
        Value::Text(s) => s.clone(),
        _ => String::new(),
    }
}

/// Points ledger wrapping a turso connection.
pub struct Database {
    conn: turso::Connection,
}

impl Database {
    /// Open (or create) a local SQLite ledger via Turso.
    pub async fn open(path: &Path) -> turso::Result<Self> {
        if let Some(parent) = path.parent() {
            // Best effort; turso reports the real error if the file can't be created
            let _ = std::fs::create_dir_all(parent);
        }
        let path_str = path.to_string_lossy().to_string();
        let db = turso::Builder::new_local(&path_str).build().await?;
        let conn = db.connect()?;
        let database = Database { conn };
        database.ensure_schema().await?;
        Ok(database)
    }

    async fn ensure_schema(&self) -> turso::Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS point_awards (\
                 user_id TEXT NOT NULL, \
                 points INTEGER NOT NULL, \
                 reason TEXT NOT NULL DEFAULT '', \
                 awarded_at TEXT NOT NULL)",
                (),
            )
            .await?;
        Ok(())
    }

    /// Append an award to the ledger.
    pub async fn award(&self, user_id: &str, points: i64, reason: &str) -> turso::Result<()> {
        let awarded_at = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO point_awards (user_id, points, reason, awarded_at) \
                 VALUES (?1, ?2, ?3, ?4)",
                turso::params::Params::Positional(vec![
                    Value::Text(user_id.to_string()),
                    Value::Integer(points),
                    Value::Text(reason.to_string()),
                    Value::Text(awarded_at),
                ]),
            )
            .await?;
        tracing::info!(user_id, points, "points awarded");
        Ok(())
    }

    /// Sum of every award for the user; unknown users total zero.
    pub async fn total_points(&self, user_id: &str) -> turso::Result<i64> {
        let mut rows = self
            .conn
            .query(
                "SELECT COALESCE(SUM(points), 0) FROM point_awards WHERE user_id = ?1",
                turso::params::Params::Positional(vec![Value::Text(user_id.to_string())]),
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(val_i64(&row.get_value(0)?))
        } else {
            Ok(0)
        }
    }

    /// Awards for a user, newest first.
    pub async fn list_awards(&self, user_id: &str) -> turso::Result<Vec<PointAward>> {
        let mut awards = Vec::new();
        let mut rows = self
            .conn
            .query(
                "SELECT user_id, points, reason, awarded_at \
                 FROM point_awards WHERE user_id = ?1 \
                 ORDER BY awarded_at DESC",
                turso::params::Params::Positional(vec![Value::Text(user_id.to_string())]),
            )
            .await?;

        while let Some(row) = rows.next().await? {
            awards.push(PointAward {
                user_id: val_string(&row.get_value(0)?),
                points: val_i64(&row.get_value(1)?),
                reason: val_string(&row.get_value(2)?),
                awarded_at: val_string(&row.get_value(3)?),
            });
        }
        Ok(awards)
    }
}

/// Open the ledger for the TUI. A ledger that can't be opened is logged and
/// replaced by a source whose lookups fail, so the profile still renders.
pub async fn open_points_source(path: &Path) -> Rc<dyn PointsSource> {
    match Database::open(path).await {
        Ok(database) => Rc::new(database),
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "points ledger unavailable, totals will not load"
            );
            Rc::new(UnavailablePoints::new(e.to_string()))
        }
    }
}

#[async_trait(?Send)]
impl PointsSource for Database {
    async fn get_points(&self, user_id: &str) -> Result<i64, PointsError> {
        Ok(self.total_points(user_id).await?)
    }
}
