//! SQLite schema definition.

/// Complete database schema for cyclewise.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- PCOS Profiles (one per user)
-- ============================================================================

CREATE TABLE IF NOT EXISTS pcos_profiles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL UNIQUE,
    pcos_type TEXT NOT NULL DEFAULT 'unknown'
        CHECK (pcos_type IN ('insulin_resistant', 'inflammatory', 'adrenal', 'post_pill', 'unknown')),
    cycle_length INTEGER NOT NULL DEFAULT 28,
    last_period_date TEXT NOT NULL,               -- YYYY-MM-DD
    last_period_end TEXT,                         -- YYYY-MM-DD
    symptoms TEXT NOT NULL DEFAULT '[]',          -- JSON array of strings
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Daily Logs
-- ============================================================================

CREATE TABLE IF NOT EXISTS daily_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    date TEXT NOT NULL,                           -- YYYY-MM-DD
    cycle_day INTEGER NOT NULL,                   -- 1-based
    symptoms TEXT NOT NULL DEFAULT '[]',          -- JSON array of strings
    energy_level INTEGER CHECK (energy_level IS NULL OR energy_level BETWEEN 1 AND 10),
    mood TEXT,
    notes TEXT
);

CREATE INDEX IF NOT EXISTS idx_logs_user_date ON daily_logs(user_id, date);

-- ============================================================================
-- Grocery Catalog
-- ============================================================================

CREATE TABLE IF NOT EXISTS grocery_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    category TEXT NOT NULL,
    benefits TEXT,
    dietary_tags TEXT NOT NULL DEFAULT '[]',              -- JSON array of strings
    pcos_suitability TEXT NOT NULL DEFAULT '{}',          -- JSON object {pcos_type: rating}
    cycle_phase_suitability TEXT NOT NULL DEFAULT '{}'    -- JSON object {phase: rating}
);

-- FTS5 virtual table for full-text search
CREATE VIRTUAL TABLE IF NOT EXISTS grocery_items_fts USING fts5(
    name,
    category,
    benefits,
    dietary_tags,
    content='grocery_items',
    content_rowid='id'
);

-- Triggers to keep FTS5 in sync with main table
CREATE TRIGGER IF NOT EXISTS grocery_items_ai AFTER INSERT ON grocery_items BEGIN
    INSERT INTO grocery_items_fts(rowid, name, category, benefits, dietary_tags)
    VALUES (new.id, new.name, new.category, new.benefits, new.dietary_tags);
END;

CREATE TRIGGER IF NOT EXISTS grocery_items_ad AFTER DELETE ON grocery_items BEGIN
    INSERT INTO grocery_items_fts(grocery_items_fts, rowid, name, category, benefits, dietary_tags)
    VALUES ('delete', old.id, old.name, old.category, old.benefits, old.dietary_tags);
END;

CREATE TRIGGER IF NOT EXISTS grocery_items_au AFTER UPDATE ON grocery_items BEGIN
    INSERT INTO grocery_items_fts(grocery_items_fts, rowid, name, category, benefits, dietary_tags)
    VALUES ('delete', old.id, old.name, old.category, old.benefits, old.dietary_tags);
    INSERT INTO grocery_items_fts(rowid, name, category, benefits, dietary_tags)
    VALUES (new.id, new.name, new.category, new.benefits, new.dietary_tags);
END;

-- ============================================================================
-- Grocery Lists
-- ============================================================================

CREATE TABLE IF NOT EXISTS grocery_lists (
    list_id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    name TEXT NOT NULL,
    cycle_phase TEXT NOT NULL,
    pcos_type TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_grocery_lists_user ON grocery_lists(user_id);

CREATE TABLE IF NOT EXISTS grocery_list_items (
    item_id TEXT PRIMARY KEY,
    list_id TEXT NOT NULL REFERENCES grocery_lists(list_id) ON DELETE CASCADE,
    user_id TEXT NOT NULL,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    quantity REAL NOT NULL DEFAULT 1,
    unit TEXT NOT NULL DEFAULT '',
    checked INTEGER NOT NULL DEFAULT 0,
    is_recommended INTEGER NOT NULL DEFAULT 0,
    is_warned INTEGER NOT NULL DEFAULT 0,
    reason TEXT,
    added_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_grocery_list_items_list ON grocery_list_items(list_id);
"#;
