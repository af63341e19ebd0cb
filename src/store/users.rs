//! User CRUD
//! Mission: Account rows with a unique email and hashed credentials

use super::{ensure_exists, NewUser, Store, StoreError, User};
use rusqlite::{params, Row};
use tracing::info;

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        occupation: row.get(4)?,
        fcm_token: row.get(5)?,
        location_id: row.get(6)?,
    })
}

const USER_COLUMNS: &str = "id, username, email, password_hash, occupation, fcm_token, location_id";

impl Store {
    /// Insert a new user. The unique-email constraint is the arbiter for
    /// concurrent signups racing on the same address; a duplicate surfaces
    /// as `EmailTaken` no matter which request loses the race.
    pub fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let conn = self.lock();

        if let Some(location_id) = new.location_id {
            ensure_exists(&conn, "locations", location_id)?;
        }

        conn.execute(
            "INSERT INTO users (username, email, password_hash, occupation, fcm_token, location_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.username,
                new.email,
                new.password_hash,
                new.occupation,
                new.fcm_token,
                new.location_id,
            ],
        )?;

        let id = conn.last_insert_rowid();
        info!(user_id = id, "created user");

        Ok(User {
            id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            occupation: new.occupation,
            fcm_token: new.fcm_token,
            location_id: new.location_id,
        })
    }

    pub fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;

        match stmt.query_row(params![id], user_from_row) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"))?;

        match stmt.query_row(params![email], user_from_row) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update the mutable profile fields; email and credentials stay put.
    pub fn update_user_profile(
        &self,
        id: i64,
        username: &str,
        occupation: Option<&str>,
        fcm_token: Option<&str>,
        location_id: Option<i64>,
    ) -> Result<(), StoreError> {
        let conn = self.lock();

        if let Some(location_id) = location_id {
            ensure_exists(&conn, "locations", location_id)?;
        }

        let rows = conn.execute(
            "UPDATE users SET username = ?2, occupation = ?3, fcm_token = ?4, location_id = ?5
             WHERE id = ?1",
            params![id, username, occupation, fcm_token, location_id],
        )?;

        if rows == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Delete a user. Fails referentially while events or reminders still
    /// point at the row; no cascade.
    pub fn delete_user(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.lock();
        let rows = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(StoreError::NotFound);
        }
        info!(user_id = id, "deleted user");
        Ok(())
    }
}
