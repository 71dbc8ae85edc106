use super::{timestamp, Store};
use common::model::team::TeamInvite;
use rusqlite::params;

impl Store {
    pub fn insert_invite(&self, invite: &TeamInvite) -> Result<(), rusqlite::Error> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO team_invites (id, owner_id, email, role, token, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                invite.id,
                invite.owner_id,
                invite.email,
                invite.role.as_str(),
                invite.token,
                timestamp(&invite.created_at),
            ],
        )?;
        Ok(())
    }

    pub fn list_invites(&self, owner_id: &str) -> Result<Vec<TeamInvite>, rusqlite::Error> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, email, role, token, created_at
               FROM team_invites WHERE owner_id = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map(params![owner_id], |row| {
            Ok(TeamInvite {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                email: row.get(2)?,
                role: super::parse_column(row, 3)?,
                token: row.get(4)?,
                created_at: super::parse_timestamp(row, 5)?,
            })
        })?;
        rows.collect()
    }
}
