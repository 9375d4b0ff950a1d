//! Database Queries
//!
//! Pulls raw record blobs out of the keychain table.

use rusqlite::Connection;

use super::{AccountRecord, DbResult};

/// Fetch every account record stored under `access_group`.
///
/// Rows are JSON blobs in the `v_Data` column of the keychain's generic
/// password table. Rows that are not UTF-8 or fail to parse are skipped so
/// one corrupt entry never hides the rest.
pub fn fetch_accounts(conn: &Connection, access_group: &str) -> DbResult<Vec<AccountRecord>> {
    let mut stmt = conn.prepare("SELECT v_Data FROM genp WHERE agrp = ?1")?;
    let rows = stmt.query_map([access_group], |row| row.get::<_, Vec<u8>>(0))?;

    let mut accounts = Vec::new();
    for row in rows {
        let blob = row?;
        let Ok(text) = std::str::from_utf8(&blob) else {
            continue;
        };
        if let Some(record) = AccountRecord::from_json(text) {
            accounts.push(record);
        }
    }
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use rusqlite::params;

    use super::*;

    const GROUP: &str = "group.com.duosecurity.duomobile";

    fn seeded_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE genp (agrp TEXT, v_Data BLOB);")
            .unwrap();
        conn
    }

    fn insert(conn: &Connection, agrp: &str, data: &[u8]) {
        conn.execute(
            "INSERT INTO genp (agrp, v_Data) VALUES (?1, ?2)",
            params![agrp, data],
        )
        .unwrap();
    }

    #[test]
    fn test_fetch_filters_by_access_group() {
        let conn = seeded_db();
        insert(
            &conn,
            GROUP,
            br#"{"displayLabel": "Work", "otpSecretKey": "JBSWY3DP"}"#,
        );
        insert(
            &conn,
            "group.other.app",
            br#"{"displayLabel": "Other", "otpSecretKey": "XXXX"}"#,
        );

        let accounts = fetch_accounts(&conn, GROUP).unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, "Work");
    }

    #[test]
    fn test_corrupt_rows_are_skipped() {
        let conn = seeded_db();
        insert(&conn, GROUP, b"\xff\xfe not utf-8");
        insert(&conn, GROUP, b"{broken json");
        insert(&conn, GROUP, br#"{"displayLabel": "Ok", "akey": "a-1"}"#);

        let accounts = fetch_accounts(&conn, GROUP).unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, "Ok");
    }

    #[test]
    fn test_empty_store_yields_no_accounts() {
        let conn = seeded_db();
        assert!(fetch_accounts(&conn, GROUP).unwrap().is_empty());
    }
}
