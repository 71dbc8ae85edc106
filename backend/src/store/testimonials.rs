use super::{
    conversion_error, parse_column, parse_optional_column, parse_optional_timestamp,
    parse_timestamp, timestamp, Store,
};
use chrono::{DateTime, Utc};
use common::model::testimonial::{CardStyle, Testimonial, TestimonialStatus, MAX_SCORE};
use log::debug;
use rusqlite::{params, OptionalExtension, Row};
use thiserror::Error;

const COLUMNS: &str = "id, owner_id, client_name, client_company, client_email, text, \
     video_ref, avatar_ref, verification_method, status, score, sentiment, keywords, \
     analysis_reasoning, score_estimated, card_style, origin, created_at, verified_at, \
     verification_token, token_expires_at";

/// Fields written alongside a status change.
#[derive(Debug, Clone, Default)]
pub struct StatusExtras {
    pub verified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Error)]
#[error("stored score {0} is outside 0..=100")]
struct StoredScoreOutOfRange(i64);

fn from_row(row: &Row) -> Result<Testimonial, rusqlite::Error> {
    let score = row
        .get::<_, Option<i64>>(10)?
        .map(|s| match u8::try_from(s) {
            Ok(v) if v <= MAX_SCORE => Ok(v),
            _ => Err(conversion_error(10, StoredScoreOutOfRange(s))),
        })
        .transpose()?;
    let keywords_json: String = row.get(12)?;
    let keywords: Vec<String> =
        serde_json::from_str(&keywords_json).map_err(|e| conversion_error(12, e))?;

    Ok(Testimonial {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        client_name: row.get(2)?,
        client_company: row.get(3)?,
        client_email: row.get(4)?,
        text: row.get(5)?,
        video_ref: row.get(6)?,
        avatar_ref: row.get(7)?,
        verification_method: parse_column(row, 8)?,
        status: parse_column(row, 9)?,
        score,
        sentiment: parse_optional_column(row, 11)?,
        keywords,
        analysis_reasoning: row.get(13)?,
        score_estimated: row.get(14)?,
        card_style: parse_column(row, 15)?,
        origin: parse_column(row, 16)?,
        created_at: parse_timestamp(row, 17)?,
        verified_at: parse_optional_timestamp(row, 18)?,
        verification_token: row.get(19)?,
        token_expires_at: parse_optional_timestamp(row, 20)?,
    })
}

impl Store {
    pub fn insert_testimonial(&self, t: &Testimonial) -> Result<(), rusqlite::Error> {
        let conn = self.connect()?;
        let keywords = serde_json::to_string(&t.keywords)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        conn.execute(
            &format!(
                "INSERT INTO testimonials ({COLUMNS}) VALUES \
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)"
            ),
            params![
                t.id,
                t.owner_id,
                t.client_name,
                t.client_company,
                t.client_email,
                t.text,
                t.video_ref,
                t.avatar_ref,
                t.verification_method.as_str(),
                t.status.as_str(),
                t.score,
                t.sentiment.map(|s| s.as_str()),
                keywords,
                t.analysis_reasoning,
                t.score_estimated,
                t.card_style.as_str(),
                t.origin.as_str(),
                timestamp(&t.created_at),
                t.verified_at.as_ref().map(timestamp),
                t.verification_token,
                t.token_expires_at.as_ref().map(timestamp),
            ],
        )?;
        Ok(())
    }

    /// Fetches a record, scoped to its owner.
    pub fn get_testimonial(
        &self,
        owner_id: &str,
        id: &str,
    ) -> Result<Option<Testimonial>, rusqlite::Error> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM testimonials WHERE id = ?1 AND owner_id = ?2"),
            params![id, owner_id],
            from_row,
        )
        .optional()
    }

    pub fn get_by_token(&self, token: &str) -> Result<Option<Testimonial>, rusqlite::Error> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM testimonials WHERE verification_token = ?1"),
            params![token],
            from_row,
        )
        .optional()
    }

    /// Moves a record from `expected` to `new` in one statement.
    ///
    /// Returns `false` when no row matched: the record is gone, belongs to
    /// someone else, or is no longer in `expected`.
    pub fn update_status(
        &self,
        owner_id: &str,
        id: &str,
        expected: TestimonialStatus,
        new: TestimonialStatus,
        extras: &StatusExtras,
    ) -> Result<bool, rusqlite::Error> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE testimonials
                SET status = ?1, verified_at = COALESCE(?2, verified_at)
              WHERE id = ?3 AND owner_id = ?4 AND status = ?5",
            params![
                new.as_str(),
                extras.verified_at.as_ref().map(timestamp),
                id,
                owner_id,
                expected.as_str(),
            ],
        )?;
        if changed == 0 {
            debug!(
                "status update {} -> {} missed testimonial {}",
                expected, new, id
            );
        }
        Ok(changed == 1)
    }

    /// Swaps the confirmation token of a record still awaiting confirmation.
    pub fn replace_token(
        &self,
        owner_id: &str,
        id: &str,
        token: &str,
        expires_at: &DateTime<Utc>,
    ) -> Result<bool, rusqlite::Error> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE testimonials
                SET verification_token = ?1, token_expires_at = ?2
              WHERE id = ?3 AND owner_id = ?4 AND status = 'pending_verification'",
            params![token, timestamp(expires_at), id, owner_id],
        )?;
        Ok(changed == 1)
    }

    pub fn update_card_style(
        &self,
        owner_id: &str,
        id: &str,
        style: CardStyle,
    ) -> Result<bool, rusqlite::Error> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE testimonials SET card_style = ?1 WHERE id = ?2 AND owner_id = ?3",
            params![style.as_str(), id, owner_id],
        )?;
        Ok(changed == 1)
    }

    pub fn delete_testimonial(&self, owner_id: &str, id: &str) -> Result<bool, rusqlite::Error> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "DELETE FROM testimonials WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        Ok(changed == 1)
    }

    /// Every record of an owner, newest first.
    pub fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Testimonial>, rusqlite::Error> {
        self.list_where(owner_id, None)
    }

    /// The owner's `verified` records, newest first.
    pub fn list_verified_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<Testimonial>, rusqlite::Error> {
        self.list_where(owner_id, Some(TestimonialStatus::Verified))
    }

    fn list_where(
        &self,
        owner_id: &str,
        status: Option<TestimonialStatus>,
    ) -> Result<Vec<Testimonial>, rusqlite::Error> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM testimonials
              WHERE owner_id = ?1 AND (?2 IS NULL OR status = ?2)
              ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt.query_map(params![owner_id, status.map(|s| s.as_str())], from_row)?;
        rows.collect()
    }

    /// Number of records per status for one owner. Missing statuses count zero.
    pub fn count_by_status(
        &self,
        owner_id: &str,
    ) -> Result<Vec<(TestimonialStatus, u64)>, rusqlite::Error> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT status, COUNT(*) FROM testimonials WHERE owner_id = ?1 GROUP BY status",
        )?;
        let rows = stmt.query_map(params![owner_id], |row| {
            Ok((parse_column::<TestimonialStatus>(row, 0)?, row.get::<_, u64>(1)?))
        })?;
        rows.collect()
    }
}
