//! `SQLite` schema definitions for qrscan.
//!
//! All application state is kept as text values under well-known keys in a
//! single `kv` table.

/// Key holding the JSON array of scan records, newest first.
pub const KEY_SCANS: &str = "scans";

/// Key holding the JSON user profile.
pub const KEY_PROFILE: &str = "profile";

/// Key holding the session flag (`"true"` / `"false"`).
pub const KEY_AUTHENTICATED: &str = "authenticated";

/// Key holding the JSON display preferences.
pub const KEY_PREFERENCES: &str = "preferences";

/// SQL statement to create the key-value table.
pub const CREATE_KV_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_KV_TABLE, CREATE_METADATA_TABLE];
