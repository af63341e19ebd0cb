//! Item CRUD
//! Mission: Checklist entries owned by an event

use super::{ensure_exists, Item, NewItem, Store, StoreError};
use rusqlite::{params, Row};

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        event_id: row.get(1)?,
        is_checked: row.get(2)?,
        notes: row.get(3)?,
    })
}

impl Store {
    pub fn create_item(&self, new: NewItem) -> Result<Item, StoreError> {
        let conn = self.lock();

        ensure_exists(&conn, "events", new.event_id)?;

        conn.execute(
            "INSERT INTO items (event_id, is_checked, notes) VALUES (?1, ?2, ?3)",
            params![new.event_id, new.is_checked, new.notes],
        )?;

        Ok(Item {
            id: conn.last_insert_rowid(),
            event_id: new.event_id,
            is_checked: new.is_checked,
            notes: new.notes,
        })
    }

    pub fn item_by_id(&self, id: i64) -> Result<Option<Item>, StoreError> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT id, event_id, is_checked, notes FROM items WHERE id = ?1")?;

        match stmt.query_row(params![id], item_from_row) {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn items_for_event(&self, event_id: i64) -> Result<Vec<Item>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, event_id, is_checked, notes FROM items WHERE event_id = ?1 ORDER BY id",
        )?;

        let items = stmt
            .query_map(params![event_id], item_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    pub fn set_item_checked(&self, id: i64, is_checked: bool) -> Result<(), StoreError> {
        let conn = self.lock();
        let rows = conn.execute(
            "UPDATE items SET is_checked = ?2 WHERE id = ?1",
            params![id, is_checked],
        )?;
        if rows == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub fn delete_item(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.lock();
        let rows = conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
