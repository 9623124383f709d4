//! Daily log database operations.

use rusqlite::params;
use tracing::info;

use super::{parse_stored_date, Database, DbError, DbResult};
use crate::models::{DailyLog, DATE_FORMAT};

impl Database {
    /// Insert a daily log, returning its row ID.
    pub fn insert_daily_log(&self, log: &DailyLog) -> DbResult<i64> {
        if !log.has_valid_energy() {
            return Err(DbError::Constraint(format!(
                "energy level must be between 1 and 10, got {:?}",
                log.energy_level
            )));
        }

        let symptoms_json = serde_json::to_string(&log.symptoms)?;

        self.conn.execute(
            r#"
            INSERT INTO daily_logs (
                user_id, date, cycle_day, symptoms, energy_level, mood, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                log.user_id,
                log.date.format(DATE_FORMAT).to_string(),
                log.cycle_day,
                symptoms_json,
                log.energy_level,
                log.mood,
                log.notes,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        info!(user_id = %log.user_id, date = %log.date, cycle_day = log.cycle_day, "logged day");
        Ok(id)
    }

    /// List a user's logs, newest date first.
    pub fn list_daily_logs(&self, user_id: &str) -> DbResult<Vec<DailyLog>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, user_id, date, cycle_day, symptoms, energy_level, mood, notes
            FROM daily_logs
            WHERE user_id = ?
            ORDER BY date DESC, id DESC
            "#,
        )?;

        let rows = stmt.query_map([user_id], |row| {
            Ok(LogRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                date: row.get(2)?,
                cycle_day: row.get(3)?,
                symptoms: row.get(4)?,
                energy_level: row.get(5)?,
                mood: row.get(6)?,
                notes: row.get(7)?,
            })
        })?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(row?.try_into()?);
        }
        Ok(logs)
    }
}

/// Intermediate row struct for database mapping.
struct LogRow {
    id: i64,
    user_id: String,
    date: String,
    cycle_day: u32,
    symptoms: String,
    energy_level: Option<u8>,
    mood: Option<String>,
    notes: Option<String>,
}

impl TryFrom<LogRow> for DailyLog {
    type Error = DbError;

    fn try_from(row: LogRow) -> Result<Self, Self::Error> {
        Ok(DailyLog {
            id: Some(row.id),
            user_id: row.user_id,
            date: parse_stored_date(&row.date)?,
            cycle_day: row.cycle_day,
            symptoms: serde_json::from_str(&row.symptoms)?,
            energy_level: row.energy_level,
            mood: row.mood,
            notes: row.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CyclePhase, CyclePosition};
    use chrono::NaiveDate;

    fn log(user_id: &str, day: u32) -> DailyLog {
        DailyLog::new(
            user_id.into(),
            NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            CyclePosition {
                cycle_day: day - 1,
                phase: CyclePhase::Menstrual,
            },
        )
    }

    #[test]
    fn test_insert_and_list() {
        let db = Database::open_in_memory().unwrap();

        let mut first = log("user-1", 1);
        first.symptoms = vec!["cramps".into()];
        first.energy_level = Some(3);
        first.mood = Some("tired".into());
        db.insert_daily_log(&first).unwrap();

        db.insert_daily_log(&log("user-1", 3)).unwrap();
        db.insert_daily_log(&log("user-2", 2)).unwrap();

        let logs = db.list_daily_logs("user-1").unwrap();
        assert_eq!(logs.len(), 2);

        // Newest first
        assert_eq!(logs[0].date, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
        assert_eq!(logs[1].symptoms, vec!["cramps"]);
        assert_eq!(logs[1].energy_level, Some(3));
        assert_eq!(logs[1].mood.as_deref(), Some("tired"));
        assert_eq!(logs[1].cycle_day, 1);
    }

    #[test]
    fn test_rejects_out_of_range_energy() {
        let db = Database::open_in_memory().unwrap();
        let mut bad = log("user-1", 1);
        bad.energy_level = Some(12);

        assert!(matches!(db.insert_daily_log(&bad), Err(DbError::Constraint(_))));
        assert!(db.list_daily_logs("user-1").unwrap().is_empty());
    }
}
