//! Reminder CRUD
//! Mission: Scheduled reminders owned by a user

use super::{ensure_exists, NewReminder, Reminder, Store, StoreError};
use rusqlite::{params, Row};

fn reminder_from_row(row: &Row<'_>) -> rusqlite::Result<Reminder> {
    Ok(Reminder {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        schedule_date: row.get(3)?,
        is_active: row.get(4)?,
        message: row.get(5)?,
    })
}

const REMINDER_COLUMNS: &str = "id, user_id, title, schedule_date, is_active, message";

impl Store {
    pub fn create_reminder(&self, new: NewReminder) -> Result<Reminder, StoreError> {
        let conn = self.lock();

        ensure_exists(&conn, "users", new.user_id)?;

        conn.execute(
            "INSERT INTO reminders (user_id, title, schedule_date, is_active, message)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.user_id,
                new.title,
                new.schedule_date,
                new.is_active,
                new.message,
            ],
        )?;

        Ok(Reminder {
            id: conn.last_insert_rowid(),
            user_id: new.user_id,
            title: new.title,
            schedule_date: new.schedule_date,
            is_active: new.is_active,
            message: new.message,
        })
    }

    pub fn reminder_by_id(&self, id: i64) -> Result<Option<Reminder>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders WHERE id = ?1"
        ))?;

        match stmt.query_row(params![id], reminder_from_row) {
            Ok(reminder) => Ok(Some(reminder)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn reminders_for_user(&self, user_id: i64) -> Result<Vec<Reminder>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders WHERE user_id = ?1 ORDER BY schedule_date, id"
        ))?;

        let reminders = stmt
            .query_map(params![user_id], reminder_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reminders)
    }

    pub fn set_reminder_active(&self, id: i64, is_active: bool) -> Result<(), StoreError> {
        let conn = self.lock();
        let rows = conn.execute(
            "UPDATE reminders SET is_active = ?2 WHERE id = ?1",
            params![id, is_active],
        )?;
        if rows == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub fn delete_reminder(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.lock();
        let rows = conn.execute("DELETE FROM reminders WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
