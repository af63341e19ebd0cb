//! Event CRUD
//! Mission: Calendar events tied to a location, optionally owned by a user

use super::{ensure_exists, Event, NewEvent, Store, StoreError};
use chrono::NaiveDate;
use rusqlite::{params, Row};
use tracing::info;

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        name: row.get(1)?,
        date: row.get(2)?,
        location_id: row.get(3)?,
        user_id: row.get(4)?,
    })
}

const EVENT_COLUMNS: &str = "id, name, date, location_id, user_id";

impl Store {
    /// Insert an event. Both references are checked up front so the caller
    /// gets a precise missing-reference error rather than a bare constraint
    /// failure.
    pub fn create_event(&self, new: NewEvent) -> Result<Event, StoreError> {
        let conn = self.lock();

        ensure_exists(&conn, "locations", new.location_id)?;
        if let Some(user_id) = new.user_id {
            ensure_exists(&conn, "users", user_id)?;
        }

        conn.execute(
            "INSERT INTO events (name, date, location_id, user_id) VALUES (?1, ?2, ?3, ?4)",
            params![new.name, new.date, new.location_id, new.user_id],
        )?;

        let id = conn.last_insert_rowid();
        info!(event_id = id, "created event");

        Ok(Event {
            id,
            name: new.name,
            date: new.date,
            location_id: new.location_id,
            user_id: new.user_id,
        })
    }

    pub fn event_by_id(&self, id: i64) -> Result<Option<Event>, StoreError> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"))?;

        match stmt.query_row(params![id], event_from_row) {
            Ok(event) => Ok(Some(event)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn events_for_user(&self, user_id: i64) -> Result<Vec<Event>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE user_id = ?1 ORDER BY date, id"
        ))?;

        let events = stmt
            .query_map(params![user_id], event_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }

    pub fn update_event(
        &self,
        id: i64,
        name: &str,
        date: NaiveDate,
        location_id: i64,
    ) -> Result<(), StoreError> {
        let conn = self.lock();

        ensure_exists(&conn, "locations", location_id)?;

        let rows = conn.execute(
            "UPDATE events SET name = ?2, date = ?3, location_id = ?4 WHERE id = ?1",
            params![id, name, date, location_id],
        )?;

        if rows == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Fails referentially while items still point at the event; no cascade.
    pub fn delete_event(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.lock();
        let rows = conn.execute("DELETE FROM events WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(StoreError::NotFound);
        }
        info!(event_id = id, "deleted event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::test_store;
    use super::*;
    use crate::store::{NewItem, NewUser};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_create_and_fetch_event() {
        let (store, _temp) = test_store();
        let location = store.create_location("Kyoto").unwrap();

        let event = store
            .create_event(NewEvent {
                name: "Party".to_string(),
                date: date("2025-01-01"),
                location_id: location.id,
                user_id: None,
            })
            .unwrap();

        assert!(event.id > 0);
        assert_eq!(event.name, "Party");
        assert_eq!(event.location_id, location.id);

        let fetched = store.event_by_id(event.id).unwrap().unwrap();
        assert_eq!(fetched.date, date("2025-01-01"));
        assert!(fetched.user_id.is_none());
    }

    #[test]
    fn test_missing_location_rejected() {
        let (store, _temp) = test_store();

        let err = store
            .create_event(NewEvent {
                name: "Party".to_string(),
                date: date("2025-01-01"),
                location_id: 1,
                user_id: None,
            })
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::MissingReference {
                table: "locations",
                id: 1
            }
        ));
    }

    #[test]
    fn test_missing_owner_rejected() {
        let (store, _temp) = test_store();
        let location = store.create_location("Kyoto").unwrap();

        let err = store
            .create_event(NewEvent {
                name: "Party".to_string(),
                date: date("2025-01-01"),
                location_id: location.id,
                user_id: Some(42),
            })
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::MissingReference {
                table: "users",
                id: 42
            }
        ));
    }

    #[test]
    fn test_events_for_user() {
        let (store, _temp) = test_store();
        let location = store.create_location("Kyoto").unwrap();
        let user = store
            .create_user(NewUser {
                username: "a".to_string(),
                email: "a@x.com".to_string(),
                password_hash: "h".to_string(),
                occupation: None,
                fcm_token: None,
                location_id: None,
            })
            .unwrap();

        for (name, d) in [("Later", "2025-02-01"), ("Sooner", "2025-01-01")] {
            store
                .create_event(NewEvent {
                    name: name.to_string(),
                    date: date(d),
                    location_id: location.id,
                    user_id: Some(user.id),
                })
                .unwrap();
        }
        // Unowned event must not show up.
        store
            .create_event(NewEvent {
                name: "Anonymous".to_string(),
                date: date("2025-01-15"),
                location_id: location.id,
                user_id: None,
            })
            .unwrap();

        let events = store.events_for_user(user.id).unwrap();
        assert_eq!(events.len(), 2);
        // Sorted by date.
        assert_eq!(events[0].name, "Sooner");
        assert_eq!(events[1].name, "Later");
    }

    #[test]
    fn test_update_and_delete_event() {
        let (store, _temp) = test_store();
        let kyoto = store.create_location("Kyoto").unwrap();
        let osaka = store.create_location("Osaka").unwrap();

        let event = store
            .create_event(NewEvent {
                name: "Party".to_string(),
                date: date("2025-01-01"),
                location_id: kyoto.id,
                user_id: None,
            })
            .unwrap();

        store
            .update_event(event.id, "Moved Party", date("2025-03-01"), osaka.id)
            .unwrap();
        let updated = store.event_by_id(event.id).unwrap().unwrap();
        assert_eq!(updated.name, "Moved Party");
        assert_eq!(updated.location_id, osaka.id);

        assert!(matches!(
            store
                .update_event(9999, "x", date("2025-01-01"), kyoto.id)
                .unwrap_err(),
            StoreError::NotFound
        ));

        store.delete_event(event.id).unwrap();
        assert!(store.event_by_id(event.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_event_with_items_blocked() {
        let (store, _temp) = test_store();
        let location = store.create_location("Kyoto").unwrap();
        let event = store
            .create_event(NewEvent {
                name: "Party".to_string(),
                date: date("2025-01-01"),
                location_id: location.id,
                user_id: None,
            })
            .unwrap();
        let item = store
            .create_item(NewItem {
                event_id: event.id,
                is_checked: false,
                notes: "cake".to_string(),
            })
            .unwrap();

        assert!(matches!(
            store.delete_event(event.id).unwrap_err(),
            StoreError::ReferentialIntegrity
        ));

        // Children first, then the event.
        store.delete_item(item.id).unwrap();
        store.delete_event(event.id).unwrap();
    }
}
