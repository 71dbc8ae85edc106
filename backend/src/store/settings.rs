use super::{timestamp, Store};
use chrono::{DateTime, Utc};
use common::model::form::FormConfig;
use common::model::profile::Profile;
use common::model::widget::WidgetConfig;
use rusqlite::{params, OptionalExtension, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;

fn profile_from_row(row: &Row) -> Result<Profile, rusqlite::Error> {
    Ok(Profile {
        owner_id: row.get(0)?,
        handle: row.get(1)?,
        display_name: row.get(2)?,
    })
}

impl Store {
    pub fn get_profile(&self, owner_id: &str) -> Result<Option<Profile>, rusqlite::Error> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT owner_id, handle, display_name FROM profiles WHERE owner_id = ?1",
            params![owner_id],
            profile_from_row,
        )
        .optional()
    }

    pub fn find_profile_by_handle(&self, handle: &str) -> Result<Option<Profile>, rusqlite::Error> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT owner_id, handle, display_name FROM profiles WHERE handle = ?1",
            params![handle],
            profile_from_row,
        )
        .optional()
    }

    /// Inserts or replaces an owner's profile. A handle already used by another
    /// owner fails with a constraint violation.
    pub fn upsert_profile(&self, profile: &Profile) -> Result<(), rusqlite::Error> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO profiles (owner_id, handle, display_name) VALUES (?1, ?2, ?3)
             ON CONFLICT(owner_id) DO UPDATE SET handle = excluded.handle,
                                                 display_name = excluded.display_name",
            params![profile.owner_id, profile.handle, profile.display_name],
        )?;
        Ok(())
    }

    pub fn get_widget_config(&self, owner_id: &str) -> Result<Option<WidgetConfig>, rusqlite::Error> {
        self.get_json("widget_configs", owner_id)
    }

    pub fn put_widget_config(&self, owner_id: &str, config: &WidgetConfig) -> Result<(), rusqlite::Error> {
        self.put_json("widget_configs", owner_id, config)
    }

    pub fn get_form_config(&self, owner_id: &str) -> Result<Option<FormConfig>, rusqlite::Error> {
        self.get_json("form_configs", owner_id)
    }

    pub fn put_form_config(&self, owner_id: &str, config: &FormConfig) -> Result<(), rusqlite::Error> {
        self.put_json("form_configs", owner_id, config)
    }

    pub fn record_view(&self, owner_id: &str, at: &DateTime<Utc>) -> Result<(), rusqlite::Error> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO views (owner_id, viewed_at) VALUES (?1, ?2)",
            params![owner_id, timestamp(at)],
        )?;
        Ok(())
    }

    pub fn count_views(&self, owner_id: &str) -> Result<u64, rusqlite::Error> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT COUNT(*) FROM views WHERE owner_id = ?1",
            params![owner_id],
            |row| row.get(0),
        )
    }

    // `table` is always one of the fixed config tables above.
    fn get_json<T: DeserializeOwned>(
        &self,
        table: &str,
        owner_id: &str,
    ) -> Result<Option<T>, rusqlite::Error> {
        let conn = self.connect()?;
        let raw: Option<String> = conn
            .query_row(
                &format!("SELECT config FROM {table} WHERE owner_id = ?1"),
                params![owner_id],
                |row| row.get(0),
            )
            .optional()?;
        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| super::conversion_error(0, e))
        })
        .transpose()
    }

    fn put_json<T: Serialize>(
        &self,
        table: &str,
        owner_id: &str,
        value: &T,
    ) -> Result<(), rusqlite::Error> {
        let json = serde_json::to_string(value)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let conn = self.connect()?;
        conn.execute(
            &format!(
                "INSERT INTO {table} (owner_id, config) VALUES (?1, ?2)
                 ON CONFLICT(owner_id) DO UPDATE SET config = excluded.config"
            ),
            params![owner_id, json],
        )?;
        Ok(())
    }
}
