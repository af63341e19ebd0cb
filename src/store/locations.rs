//! Location CRUD
//! Mission: Shared places referenced by users and events

use super::{Location, Store, StoreError};
use rusqlite::params;

impl Store {
    pub fn create_location(&self, name: &str) -> Result<Location, StoreError> {
        let conn = self.lock();
        conn.execute("INSERT INTO locations (name) VALUES (?1)", params![name])?;

        Ok(Location {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    pub fn location_by_id(&self, id: i64) -> Result<Option<Location>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT id, name FROM locations WHERE id = ?1")?;

        match stmt.query_row(params![id], |row| {
            Ok(Location {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        }) {
            Ok(location) => Ok(Some(location)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT id, name FROM locations ORDER BY id")?;

        let locations = stmt
            .query_map([], |row| {
                Ok(Location {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(locations)
    }

    /// Fails referentially while users or events still point at the row.
    pub fn delete_location(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.lock();
        let rows = conn.execute("DELETE FROM locations WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::test_store;
    use super::*;
    use crate::store::NewEvent;
    use chrono::NaiveDate;

    #[test]
    fn test_create_list_delete() {
        let (store, _temp) = test_store();

        let kyoto = store.create_location("Kyoto").unwrap();
        let osaka = store.create_location("Osaka").unwrap();
        assert_ne!(kyoto.id, osaka.id);

        let all = store.list_locations().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Kyoto");

        store.delete_location(osaka.id).unwrap();
        assert!(store.location_by_id(osaka.id).unwrap().is_none());
        assert_eq!(store.list_locations().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_referenced_location_blocked() {
        let (store, _temp) = test_store();

        let location = store.create_location("Kyoto").unwrap();
        store
            .create_event(NewEvent {
                name: "Party".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                location_id: location.id,
                user_id: None,
            })
            .unwrap();

        assert!(matches!(
            store.delete_location(location.id).unwrap_err(),
            StoreError::ReferentialIntegrity
        ));
    }
}
