//! SQL DDL for initializing the database schema.

/// SQLite schema includes:
/// - `personalization_features` (training focus cards on the homepage)
/// - `membership_plans` / `membership_features` (membership section)
/// - `access_passes` / `pass_features` (day-pass section, features linked by `pass_id`)
/// - `social_posts` (community feed)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS personalization_features (
    id TEXT PRIMARY KEY NOT NULL,
    feature_id TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    image_key TEXT NULL,
    icon_name TEXT NULL,
    created_at TEXT NOT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS membership_plans (
    id TEXT PRIMARY KEY NOT NULL,
    plan_id TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    price TEXT NOT NULL,
    original_price TEXT NULL,
    duration TEXT NULL,
    href TEXT NULL,
    tag TEXT NULL,
    sort_order INTEGER NULL
);

CREATE TABLE IF NOT EXISTS membership_features (
    id TEXT PRIMARY KEY NOT NULL,
    feature_text TEXT NOT NULL,
    sort_order INTEGER NULL
);

CREATE TABLE IF NOT EXISTS access_passes (
    id TEXT PRIMARY KEY NOT NULL,
    pass_id TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    price TEXT NOT NULL,
    duration TEXT NULL,
    href TEXT NULL,
    featured INTEGER NULL,
    sort_order INTEGER NULL
);

CREATE TABLE IF NOT EXISTS pass_features (
    id TEXT PRIMARY KEY NOT NULL,
    pass_id TEXT NOT NULL REFERENCES access_passes(pass_id) ON UPDATE CASCADE ON DELETE CASCADE,
    feature_text TEXT NOT NULL,
    sort_order INTEGER NULL
);

CREATE INDEX IF NOT EXISTS idx_pass_features_pass_id ON pass_features(pass_id);

CREATE TABLE IF NOT EXISTS social_posts (
    id TEXT PRIMARY KEY NOT NULL,
    platform TEXT NOT NULL CHECK (platform IN ('instagram', 'facebook')),
    caption TEXT NOT NULL,
    media_key TEXT NOT NULL,
    likes INTEGER NOT NULL DEFAULT 0,
    comments INTEGER NOT NULL DEFAULT 0,
    timestamp TEXT NOT NULL -- RFC3339
);
"#;
