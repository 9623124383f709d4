//! Shopping list database operations.

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_tag, Database, DbError, DbResult};
use crate::models::{GroceryList, GroceryListItem};

impl Database {
    /// Insert a new shopping list.
    pub fn create_grocery_list(&self, list: &GroceryList) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO grocery_lists (
                list_id, user_id, name, cycle_phase, pcos_type, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                list.list_id,
                list.user_id,
                list.name,
                list.cycle_phase.as_str(),
                list.pcos_type.as_str(),
                list.created_at,
                list.updated_at,
            ],
        )?;
        info!(list_id = %list.list_id, user_id = %list.user_id, "created grocery list");
        Ok(())
    }

    /// List a user's shopping lists, most recently changed first.
    pub fn list_grocery_lists(&self, user_id: &str) -> DbResult<Vec<GroceryList>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT list_id, user_id, name, cycle_phase, pcos_type, created_at, updated_at
            FROM grocery_lists
            WHERE user_id = ?
            ORDER BY updated_at DESC, created_at DESC
            "#,
        )?;

        let rows = stmt.query_map([user_id], ListRow::from_row)?;

        let mut lists = Vec::new();
        for row in rows {
            lists.push(row?.try_into()?);
        }
        Ok(lists)
    }

    /// Get a shopping list by ID.
    pub fn get_grocery_list(&self, list_id: &str) -> DbResult<Option<GroceryList>> {
        let result = self
            .conn
            .query_row(
                r#"
                SELECT list_id, user_id, name, cycle_phase, pcos_type, created_at, updated_at
                FROM grocery_lists
                WHERE list_id = ?
                "#,
                [list_id],
                ListRow::from_row,
            )
            .optional()?;

        result.map(|row| row.try_into()).transpose()
    }

    /// Delete a shopping list and all of its items.
    pub fn delete_grocery_list(&self, list_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM grocery_lists WHERE list_id = ?", [list_id])?;
        if rows_affected > 0 {
            info!(list_id, "deleted grocery list");
        }
        Ok(rows_affected > 0)
    }

    /// Add an item to its list and bump the list's `updated_at`.
    pub fn add_grocery_list_item(&mut self, item: &GroceryListItem) -> DbResult<()> {
        let tx = self.conn.transaction()?;

        let exists: Option<i64> = tx
            .query_row(
                "SELECT 1 FROM grocery_lists WHERE list_id = ?",
                [&item.list_id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(DbError::NotFound(format!("grocery list {}", item.list_id)));
        }

        tx.execute(
            r#"
            INSERT INTO grocery_list_items (
                item_id, list_id, user_id, name, category, quantity, unit,
                checked, is_recommended, is_warned, reason, added_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                item.item_id,
                item.list_id,
                item.user_id,
                item.name,
                item.category,
                item.quantity,
                item.unit,
                item.checked,
                item.is_recommended,
                item.is_warned,
                item.reason,
                item.added_at,
            ],
        )?;
        touch_list(&tx, &item.list_id)?;

        tx.commit()?;
        Ok(())
    }

    /// Items on a list in the order they were added.
    pub fn list_grocery_list_items(&self, list_id: &str) -> DbResult<Vec<GroceryListItem>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT item_id, list_id, user_id, name, category, quantity, unit,
                   checked, is_recommended, is_warned, reason, added_at
            FROM grocery_list_items
            WHERE list_id = ?
            ORDER BY added_at, rowid
            "#,
        )?;

        let rows = stmt.query_map([list_id], |row| {
            Ok(GroceryListItem {
                item_id: row.get(0)?,
                list_id: row.get(1)?,
                user_id: row.get(2)?,
                name: row.get(3)?,
                category: row.get(4)?,
                quantity: row.get(5)?,
                unit: row.get(6)?,
                checked: row.get(7)?,
                is_recommended: row.get(8)?,
                is_warned: row.get(9)?,
                reason: row.get(10)?,
                added_at: row.get(11)?,
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Flip an item's checked flag. Returns the new value.
    pub fn toggle_grocery_list_item(&mut self, item_id: &str) -> DbResult<bool> {
        let tx = self.conn.transaction()?;

        let current: Option<(String, bool)> = tx
            .query_row(
                "SELECT list_id, checked FROM grocery_list_items WHERE item_id = ?",
                [item_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let (list_id, checked) =
            current.ok_or_else(|| DbError::NotFound(format!("grocery list item {}", item_id)))?;

        let checked = !checked;
        tx.execute(
            "UPDATE grocery_list_items SET checked = ? WHERE item_id = ?",
            params![checked, item_id],
        )?;
        touch_list(&tx, &list_id)?;

        tx.commit()?;
        Ok(checked)
    }

    /// Remove an item from its list.
    pub fn remove_grocery_list_item(&mut self, item_id: &str) -> DbResult<bool> {
        let tx = self.conn.transaction()?;

        let list_id: Option<String> = tx
            .query_row(
                "SELECT list_id FROM grocery_list_items WHERE item_id = ?",
                [item_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(list_id) = list_id else {
            return Ok(false);
        };

        tx.execute("DELETE FROM grocery_list_items WHERE item_id = ?", [item_id])?;
        touch_list(&tx, &list_id)?;

        tx.commit()?;
        Ok(true)
    }
}

fn touch_list(conn: &rusqlite::Connection, list_id: &str) -> DbResult<()> {
    conn.execute(
        "UPDATE grocery_lists SET updated_at = ? WHERE list_id = ?",
        params![chrono::Utc::now().to_rfc3339(), list_id],
    )?;
    Ok(())
}

/// Intermediate row struct for database mapping.
struct ListRow {
    list_id: String,
    user_id: String,
    name: String,
    cycle_phase: String,
    pcos_type: String,
    created_at: String,
    updated_at: String,
}

impl ListRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            list_id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            cycle_phase: row.get(3)?,
            pcos_type: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

impl TryFrom<ListRow> for GroceryList {
    type Error = DbError;

    fn try_from(row: ListRow) -> Result<Self, Self::Error> {
        Ok(GroceryList {
            list_id: row.list_id,
            user_id: row.user_id,
            name: row.name,
            cycle_phase: parse_tag(&row.cycle_phase)?,
            pcos_type: parse_tag(&row.pcos_type)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CyclePhase, PcosType};

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn list(user_id: &str, name: &str) -> GroceryList {
        GroceryList::new(user_id.into(), name.into(), CyclePhase::Follicular, PcosType::Inflammatory)
    }

    fn item(list: &GroceryList, name: &str) -> GroceryListItem {
        GroceryListItem::new(list, name.into(), "vegetable".into(), 1.0, "bunch".into())
    }

    #[test]
    fn test_create_and_get() {
        let db = setup_db();
        let l = list("user-1", "Weekly");
        db.create_grocery_list(&l).unwrap();

        let retrieved = db.get_grocery_list(&l.list_id).unwrap().unwrap();
        assert_eq!(retrieved, l);
        assert!(db.get_grocery_list("missing").unwrap().is_none());
    }

    #[test]
    fn test_list_newest_first_per_user() {
        let mut db = setup_db();
        let older = list("user-1", "Older");
        let newer = list("user-1", "Newer");
        db.create_grocery_list(&older).unwrap();
        db.create_grocery_list(&newer).unwrap();
        db.create_grocery_list(&list("user-2", "Other")).unwrap();

        // Adding to the older list makes it the most recently changed
        db.add_grocery_list_item(&item(&older, "Kale")).unwrap();

        let lists = db.list_grocery_lists("user-1").unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].name, "Older");
        assert_eq!(lists[1].name, "Newer");
    }

    #[test]
    fn test_add_touches_list() {
        let mut db = setup_db();
        let l = list("user-1", "Weekly");
        db.create_grocery_list(&l).unwrap();

        db.add_grocery_list_item(&item(&l, "Spinach")).unwrap();

        let stored = db.get_grocery_list(&l.list_id).unwrap().unwrap();
        assert!(stored.updated_at >= l.updated_at);
        assert_eq!(db.list_grocery_list_items(&l.list_id).unwrap().len(), 1);
    }

    #[test]
    fn test_add_to_missing_list() {
        let mut db = setup_db();
        let l = list("user-1", "Never saved");
        let result = db.add_grocery_list_item(&item(&l, "Spinach"));
        assert!(matches!(result, Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_items_keep_flags_and_order() {
        let mut db = setup_db();
        let l = list("user-1", "Weekly");
        db.create_grocery_list(&l).unwrap();

        let mut flagged = item(&l, "White bread");
        flagged.is_warned = true;
        flagged.reason = Some("avoid for Inflammatory PCOS".into());
        db.add_grocery_list_item(&flagged).unwrap();
        db.add_grocery_list_item(&item(&l, "Spinach")).unwrap();

        let items = db.list_grocery_list_items(&l.list_id).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], flagged);
        assert_eq!(items[1].name, "Spinach");
    }

    #[test]
    fn test_toggle() {
        let mut db = setup_db();
        let l = list("user-1", "Weekly");
        db.create_grocery_list(&l).unwrap();
        let i = item(&l, "Berries");
        db.add_grocery_list_item(&i).unwrap();

        assert!(db.toggle_grocery_list_item(&i.item_id).unwrap());
        assert!(!db.toggle_grocery_list_item(&i.item_id).unwrap());
        assert!(matches!(
            db.toggle_grocery_list_item("missing"),
            Err(DbError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove_item() {
        let mut db = setup_db();
        let l = list("user-1", "Weekly");
        db.create_grocery_list(&l).unwrap();
        let i = item(&l, "Berries");
        db.add_grocery_list_item(&i).unwrap();

        assert!(db.remove_grocery_list_item(&i.item_id).unwrap());
        assert!(!db.remove_grocery_list_item(&i.item_id).unwrap());
        assert!(db.list_grocery_list_items(&l.list_id).unwrap().is_empty());
    }

    #[test]
    fn test_delete_cascades() {
        let mut db = setup_db();
        let l = list("user-1", "Weekly");
        db.create_grocery_list(&l).unwrap();
        db.add_grocery_list_item(&item(&l, "Kale")).unwrap();

        assert!(db.delete_grocery_list(&l.list_id).unwrap());
        assert!(db.get_grocery_list(&l.list_id).unwrap().is_none());
        assert!(db.list_grocery_list_items(&l.list_id).unwrap().is_empty());
        assert!(!db.delete_grocery_list(&l.list_id).unwrap());
    }
}
