//! Grocery catalog database operations.

use rusqlite::{params, OptionalExtension};
use tracing::{debug, info};

use super::{parse_tag, Database, DbError, DbResult};
use crate::models::FoodItem;

const FOOD_COLUMNS: &str =
    "g.id, g.name, g.category, g.benefits, g.dietary_tags, g.pcos_suitability, g.cycle_phase_suitability";

impl Database {
    /// Insert or update a food item (keyed by name). Returns its row ID.
    pub fn upsert_food_item(&self, item: &FoodItem) -> DbResult<i64> {
        let tags_json = serde_json::to_string(&item.dietary_tags)?;
        let pcos_json = serde_json::to_string(&item.pcos_suitability)?;
        let cycle_json = serde_json::to_string(&item.cycle_phase_suitability)?;

        let id = self.conn.query_row(
            r#"
            INSERT INTO grocery_items (
                name, category, benefits, dietary_tags,
                pcos_suitability, cycle_phase_suitability
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(name) DO UPDATE SET
                category = excluded.category,
                benefits = excluded.benefits,
                dietary_tags = excluded.dietary_tags,
                pcos_suitability = excluded.pcos_suitability,
                cycle_phase_suitability = excluded.cycle_phase_suitability
            RETURNING id
            "#,
            params![
                item.name,
                item.category.as_str(),
                item.benefits,
                tags_json,
                pcos_json,
                cycle_json,
            ],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Get a food item by row ID.
    pub fn get_food_item(&self, id: i64) -> DbResult<Option<FoodItem>> {
        let sql = format!("SELECT {} FROM grocery_items g WHERE g.id = ?", FOOD_COLUMNS);
        let result = self
            .conn
            .query_row(&sql, [id], FoodItemRow::from_row)
            .optional()?;

        result.map(|row| row.try_into()).transpose()
    }

    /// Search the catalog using FTS5 (BM25 ranking) over name, category,
    /// benefits and dietary tags.
    pub fn search_food_items(&self, query: &str, limit: usize) -> DbResult<Vec<FoodItem>> {
        let escaped_query = escape_fts_query(query);
        if escaped_query.is_empty() {
            return self.list_food_items(limit);
        }

        let sql = format!(
            r#"
            SELECT {}, bm25(grocery_items_fts) as rank
            FROM grocery_items g
            JOIN grocery_items_fts fts ON g.id = fts.rowid
            WHERE grocery_items_fts MATCH ?
            ORDER BY rank
            LIMIT ?
            "#,
            FOOD_COLUMNS
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![escaped_query, limit as i64], FoodItemRow::from_row)?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?.try_into()?);
        }
        debug!(query, matches = items.len(), "catalog search");
        Ok(items)
    }

    /// List catalog items in insertion order.
    pub fn list_food_items(&self, limit: usize) -> DbResult<Vec<FoodItem>> {
        let sql = format!("SELECT {} FROM grocery_items g ORDER BY g.id LIMIT ?", FOOD_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([limit as i64], FoodItemRow::from_row)?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?.try_into()?);
        }
        Ok(items)
    }

    /// Number of catalog items.
    pub fn count_food_items(&self) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM grocery_items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete a food item.
    pub fn delete_food_item(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM grocery_items WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Insert `items` only if the catalog is empty. Returns how many were inserted.
    pub fn seed_catalog(&self, items: &[FoodItem]) -> DbResult<usize> {
        if self.count_food_items()? > 0 {
            debug!("catalog already populated, skipping seed");
            return Ok(0);
        }

        for item in items {
            self.upsert_food_item(item)?;
        }
        info!(count = items.len(), "seeded grocery catalog");
        Ok(items.len())
    }
}

/// Intermediate row struct for database mapping.
struct FoodItemRow {
    id: i64,
    name: String,
    category: String,
    benefits: Option<String>,
    dietary_tags: String,
    pcos_suitability: String,
    cycle_phase_suitability: String,
}

impl FoodItemRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            benefits: row.get(3)?,
            dietary_tags: row.get(4)?,
            pcos_suitability: row.get(5)?,
            cycle_phase_suitability: row.get(6)?,
        })
    }
}

impl TryFrom<FoodItemRow> for FoodItem {
    type Error = DbError;

    fn try_from(row: FoodItemRow) -> Result<Self, Self::Error> {
        Ok(FoodItem {
            id: Some(row.id),
            name: row.name,
            category: parse_tag(&row.category)?,
            benefits: row.benefits,
            dietary_tags: serde_json::from_str(&row.dietary_tags)?,
            pcos_suitability: serde_json::from_str(&row.pcos_suitability)?,
            cycle_phase_suitability: serde_json::from_str(&row.cycle_phase_suitability)?,
        })
    }
}

/// Turn free text into an FTS5 prefix query.
///
/// Every word becomes a quoted prefix term, so words like `AND` or `NOT`
/// are matched as text rather than parsed as operators.
fn escape_fts_query(query: &str) -> String {
    let cleaned: String = query
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .map(|word| format!("\"{}\"*", word))
        .collect::<Vec<_>>()
        .join(" OR ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CyclePhase, FoodCategory, PcosType, RatingTable, SuitabilityRating};

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn food(name: &str, category: FoodCategory) -> FoodItem {
        FoodItem::new(name.into(), category)
    }

    #[test]
    fn test_upsert_and_get() {
        let db = setup_db();

        let mut item = food("Wild Salmon", FoodCategory::Protein);
        item.benefits = Some("Omega-3 fatty acids".into());
        item.dietary_tags = vec!["gluten_free".into(), "dairy_free".into()];
        item.pcos_suitability =
            RatingTable::new().with(PcosType::Inflammatory, SuitabilityRating::Recommended);
        item.cycle_phase_suitability =
            RatingTable::new().with(CyclePhase::Menstrual, SuitabilityRating::Recommended);

        let id = db.upsert_food_item(&item).unwrap();
        let retrieved = db.get_food_item(id).unwrap().unwrap();

        assert_eq!(retrieved.id, Some(id));
        assert_eq!(retrieved.name, "Wild Salmon");
        assert_eq!(retrieved.category, FoodCategory::Protein);
        assert_eq!(retrieved.dietary_tags, vec!["gluten_free", "dairy_free"]);
        assert_eq!(retrieved.pcos_suitability, item.pcos_suitability);
        assert_eq!(retrieved.cycle_phase_suitability, item.cycle_phase_suitability);
    }

    #[test]
    fn test_upsert_updates_by_name() {
        let db = setup_db();

        let mut item = food("Quinoa", FoodCategory::Grain);
        let first = db.upsert_food_item(&item).unwrap();

        item.benefits = Some("Complete protein".into());
        let second = db.upsert_food_item(&item).unwrap();

        assert_eq!(first, second);
        assert_eq!(db.count_food_items().unwrap(), 1);
        let retrieved = db.get_food_item(first).unwrap().unwrap();
        assert_eq!(retrieved.benefits.as_deref(), Some("Complete protein"));
    }

    #[test]
    fn test_search_by_name_category_and_prefix() {
        let db = setup_db();
        db.upsert_food_item(&food("Spinach", FoodCategory::Vegetable)).unwrap();
        db.upsert_food_item(&food("Berries", FoodCategory::Fruit)).unwrap();
        db.upsert_food_item(&food("Kale", FoodCategory::Vegetable)).unwrap();

        let results = db.search_food_items("spinach", 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Spinach");

        let results = db.search_food_items("vegetable", 10).unwrap();
        assert_eq!(results.len(), 2);

        let results = db.search_food_items("ber", 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Berries");
    }

    #[test]
    fn test_search_multi_word_matches_any() {
        let db = setup_db();
        db.upsert_food_item(&food("Greek Yogurt", FoodCategory::Dairy)).unwrap();
        db.upsert_food_item(&food("Wild Salmon", FoodCategory::Protein)).unwrap();

        let results = db.search_food_items("plain greek yogurt", 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Greek Yogurt");
    }

    #[test]
    fn test_search_special_characters_only_lists() {
        let db = setup_db();
        db.upsert_food_item(&food("Avocado", FoodCategory::Fat)).unwrap();

        let results = db.search_food_items("\"*(", 10).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_list_respects_limit() {
        let db = setup_db();
        for name in ["A", "B", "C"] {
            db.upsert_food_item(&food(name, FoodCategory::Other)).unwrap();
        }
        let items = db.list_food_items(2).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "A");
    }

    #[test]
    fn test_seed_only_when_empty() {
        let db = setup_db();
        let items = vec![food("Turmeric", FoodCategory::Spice), food("Green Tea", FoodCategory::Beverage)];

        assert_eq!(db.seed_catalog(&items).unwrap(), 2);
        assert_eq!(db.seed_catalog(&items).unwrap(), 0);
        assert_eq!(db.count_food_items().unwrap(), 2);
    }

    #[test]
    fn test_delete() {
        let db = setup_db();
        let id = db.upsert_food_item(&food("Avocado", FoodCategory::Fat)).unwrap();
        assert!(db.delete_food_item(id).unwrap());
        assert!(db.get_food_item(id).unwrap().is_none());
        assert!(db.search_food_items("avocado", 10).unwrap().is_empty());
    }

    #[test]
    fn test_escape_fts_query() {
        assert_eq!(escape_fts_query("greek yogurt"), r#""greek"* OR "yogurt"*"#);
        assert_eq!(escape_fts_query("  "), "");
        assert_eq!(escape_fts_query("salmon\"; DROP"), r#""salmon"* OR "DROP"*"#);
        assert_eq!(escape_fts_query("NOT"), r#""NOT"*"#);
    }

    #[test]
    fn test_search_operator_words_as_text() {
        let db = setup_db();
        db.upsert_food_item(&food("Green Tea", FoodCategory::Beverage)).unwrap();
        db.upsert_food_item(&food("Spinach", FoodCategory::Vegetable)).unwrap();

        for query in ["AND", "OR", "NOT", "near", "tea NOT", "spinach OR", "salt AND pepper"] {
            assert!(
                db.search_food_items(query, 20).is_ok(),
                "query {:?} should not be a syntax error",
                query
            );
        }

        let results = db.search_food_items("tea NOT", 20).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Green Tea");

        let results = db.search_food_items("spinach OR", 20).unwrap();
        assert_eq!(results[0].name, "Spinach");
    }
}
