pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS scans (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    owner_id TEXT NOT NULL,
    uploaded_at TEXT NOT NULL,
    result TEXT
);

CREATE INDEX IF NOT EXISTS idx_scans_owner ON scans(owner_id);
CREATE INDEX IF NOT EXISTS idx_scans_uploaded ON scans(uploaded_at);
";
