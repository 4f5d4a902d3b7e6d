use chrono::{DateTime, Utc};

use super::Database;
use crate::errors::DeckError;
use crate::models::ScanRecord;

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<ScanRecord> {
    let uploaded_at: String = row.get(3)?;
    let result_json: Option<String> = row.get(4)?;
    Ok(ScanRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        owner_id: row.get(2)?,
        // Timestamps are persisted as RFC 3339 UTC; parse failures mean a
        // corrupted row and surface as a query error.
        uploaded_at: DateTime::parse_from_rfc3339(&uploaded_at)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
        result: result_json.and_then(|s| serde_json::from_str(&s).ok()),
    })
}

impl Database {
    pub fn create_scan(
        &self,
        id: &str,
        name: &str,
        owner_id: &str,
        uploaded_at: DateTime<Utc>,
    ) -> Result<(), DeckError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO scans (id, name, owner_id, uploaded_at, result) VALUES (?1, ?2, ?3, ?4, NULL)",
            rusqlite::params![id, name, owner_id, uploaded_at.to_rfc3339()],
        )
        .map_err(|e| DeckError::Database(format!("Failed to create scan: {}", e)))?;
        Ok(())
    }

    pub fn get_scan(&self, id: &str, owner_id: &str) -> Result<Option<ScanRecord>, DeckError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, name, owner_id, uploaded_at, result FROM scans WHERE id = ?1 AND owner_id = ?2",
            )
            .map_err(|e| DeckError::Database(format!("Query failed: {}", e)))?;

        let result = stmt.query_row(rusqlite::params![id, owner_id], row_to_record);
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DeckError::Database(format!("Query error: {}", e))),
        }
    }

    /// All scans for one owner, newest upload first.
    pub fn list_scans(&self, owner_id: &str) -> Result<Vec<ScanRecord>, DeckError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, name, owner_id, uploaded_at, result FROM scans WHERE owner_id = ?1 ORDER BY uploaded_at DESC",
            )
            .map_err(|e| DeckError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt
            .query_map(rusqlite::params![owner_id], row_to_record)
            .map_err(|e| DeckError::Database(format!("Query error: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| DeckError::Database(format!("Row error: {}", e)))?);
        }
        Ok(records)
    }

    pub fn delete_scan(&self, id: &str, owner_id: &str) -> Result<bool, DeckError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn
            .execute(
                "DELETE FROM scans WHERE id = ?1 AND owner_id = ?2",
                rusqlite::params![id, owner_id],
            )
            .map_err(|e| DeckError::Database(format!("Delete failed: {}", e)))?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 18, 8, 30, 47).unwrap()
    }

    #[test]
    fn test_db_create_and_get_scan() {
        let db = Database::in_memory().unwrap();
        db.create_scan("scan-1", "vault.cairo", "owner-1", t0()).unwrap();

        let scan = db.get_scan("scan-1", "owner-1").unwrap().unwrap();
        assert_eq!(scan.id, "scan-1");
        assert_eq!(scan.name, "vault.cairo");
        assert_eq!(scan.owner_id, "owner-1");
        assert_eq!(scan.uploaded_at, t0());
        assert!(scan.result.is_none());
    }

    #[test]
    fn test_db_get_scan_is_owner_scoped() {
        let db = Database::in_memory().unwrap();
        db.create_scan("scan-1", "vault.cairo", "owner-1", t0()).unwrap();

        assert!(db.get_scan("scan-1", "owner-2").unwrap().is_none());
        assert!(db.get_scan("nonexistent", "owner-1").unwrap().is_none());
    }

    #[test]
    fn test_db_list_scans_newest_first() {
        let db = Database::in_memory().unwrap();
        for i in 0..4i64 {
            db.create_scan(
                &format!("scan-{}", i),
                &format!("contract-{}.sol", i),
                "owner-1",
                t0() + chrono::Duration::seconds(i * 60),
            )
            .unwrap();
        }
        db.create_scan("other", "other.sol", "owner-2", t0()).unwrap();

        let scans = db.list_scans("owner-1").unwrap();
        assert_eq!(scans.len(), 4);
        assert_eq!(scans[0].id, "scan-3");
        assert_eq!(scans[3].id, "scan-0");
        for pair in scans.windows(2) {
            assert!(pair[0].uploaded_at >= pair[1].uploaded_at);
        }
    }

    #[test]
    fn test_db_list_scans_empty_owner() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_scans("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_db_delete_scan() {
        let db = Database::in_memory().unwrap();
        db.create_scan("scan-del", "vault.cairo", "owner-1", t0()).unwrap();

        assert!(db.delete_scan("scan-del", "owner-1").unwrap());
        assert!(db.get_scan("scan-del", "owner-1").unwrap().is_none());
        assert!(!db.delete_scan("scan-del", "owner-1").unwrap());
    }

    #[test]
    fn test_db_delete_requires_matching_owner() {
        let db = Database::in_memory().unwrap();
        db.create_scan("scan-1", "vault.cairo", "owner-1", t0()).unwrap();

        assert!(!db.delete_scan("scan-1", "owner-2").unwrap());
        assert!(db.get_scan("scan-1", "owner-1").unwrap().is_some());
    }

    #[test]
    fn test_db_roundtrips_utc_timestamps() {
        let db = Database::in_memory().unwrap();
        let uploaded = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        db.create_scan("scan-tz", "vault.cairo", "owner-1", uploaded).unwrap();

        let scan = db.get_scan("scan-tz", "owner-1").unwrap().unwrap();
        assert_eq!(scan.uploaded_at, uploaded);
        assert_eq!(scan.uploaded_at.timezone(), Utc);
    }
}
