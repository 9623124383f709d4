//! PCOS profile database operations.

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_stored_date, parse_tag, Database, DbError, DbResult};
use crate::models::{PcosProfile, DATE_FORMAT};

impl Database {
    /// Create the user's profile, or replace the existing one.
    ///
    /// Returns the stored profile with its row ID and fresh `updated_at`.
    pub fn upsert_pcos_profile(&self, profile: &PcosProfile) -> DbResult<PcosProfile> {
        if profile.cycle_length <= 0 {
            return Err(DbError::Constraint(format!(
                "cycle length must be positive, got {}",
                profile.cycle_length
            )));
        }

        let symptoms_json = serde_json::to_string(&profile.symptoms)?;
        let updated_at = chrono::Utc::now().to_rfc3339();

        self.conn.execute(
            r#"
            INSERT INTO pcos_profiles (
                user_id, pcos_type, cycle_length, last_period_date,
                last_period_end, symptoms, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(user_id) DO UPDATE SET
                pcos_type = excluded.pcos_type,
                cycle_length = excluded.cycle_length,
                last_period_date = excluded.last_period_date,
                last_period_end = excluded.last_period_end,
                symptoms = excluded.symptoms,
                updated_at = excluded.updated_at
            "#,
            params![
                profile.user_id,
                profile.pcos_type.as_str(),
                profile.cycle_length,
                profile.last_period_date.format(DATE_FORMAT).to_string(),
                profile
                    .last_period_end
                    .map(|d| d.format(DATE_FORMAT).to_string()),
                symptoms_json,
                updated_at,
            ],
        )?;

        info!(user_id = %profile.user_id, pcos_type = %profile.pcos_type, "saved pcos profile");

        self.get_pcos_profile(&profile.user_id)?
            .ok_or_else(|| DbError::NotFound(profile.user_id.clone()))
    }

    /// Get a user's profile.
    pub fn get_pcos_profile(&self, user_id: &str) -> DbResult<Option<PcosProfile>> {
        let result = self
            .conn
            .query_row(
                r#"
                SELECT id, user_id, pcos_type, cycle_length, last_period_date,
                       last_period_end, symptoms, updated_at
                FROM pcos_profiles
                WHERE user_id = ?
                "#,
                [user_id],
                |row| {
                    Ok(ProfileRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        pcos_type: row.get(2)?,
                        cycle_length: row.get(3)?,
                        last_period_date: row.get(4)?,
                        last_period_end: row.get(5)?,
                        symptoms: row.get(6)?,
                        updated_at: row.get(7)?,
                    })
                },
            )
            .optional()?;

        result.map(|row| row.try_into()).transpose()
    }

    /// Delete a user's profile.
    pub fn delete_pcos_profile(&self, user_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM pcos_profiles WHERE user_id = ?", [user_id])?;
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct ProfileRow {
    id: i64,
    user_id: String,
    pcos_type: String,
    cycle_length: i32,
    last_period_date: String,
    last_period_end: Option<String>,
    symptoms: String,
    updated_at: String,
}

impl TryFrom<ProfileRow> for PcosProfile {
    type Error = DbError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(PcosProfile {
            id: Some(row.id),
            user_id: row.user_id,
            pcos_type: parse_tag(&row.pcos_type)?,
            cycle_length: row.cycle_length,
            last_period_date: parse_stored_date(&row.last_period_date)?,
            last_period_end: row
                .last_period_end
                .as_deref()
                .map(parse_stored_date)
                .transpose()?,
            symptoms: serde_json::from_str(&row.symptoms)?,
            updated_at: row.updated_at,
        })
    }
}
