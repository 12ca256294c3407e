use sqlite::{Connection, State};
use std::path::Path;

use super::KeyValueStore;
use crate::WallResult;

pub const KV_TABLE: &str = "kv";

/// Local key-value store backed by a single sqlite table. This is the
/// on-disk stand-in for browser-local storage.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the db at `path`, creating missing parent
    /// directories and the key-value table.
    pub fn open(path: &Path) -> WallResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.try_exists()? {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = sqlite::open(path)?;
        setup_tables(&conn)?;
        tracing::debug!(db = %path.display(), "opened local storage");
        Ok(Self { conn })
    }
}

pub fn setup_tables(conn: &Connection) -> WallResult<()> {
    let statement = format!(
        "
        CREATE TABLE IF NOT EXISTS {KV_TABLE}
        (key TEXT PRIMARY KEY,
        value TEXT NOT NULL);
    "
    );

    conn.execute(statement)?;

    Ok(())
}

impl KeyValueStore for SqliteStorage {
    fn get(&self, key: &str) -> WallResult<Option<String>> {
        let statement = format!("SELECT value FROM {KV_TABLE} WHERE key = ?");
        let mut stmt = self.conn.prepare(statement)?;
        stmt.bind((1, key))?;

        if let State::Row = stmt.next()? {
            return Ok(Some(stmt.read::<String, _>("value")?));
        }
        Ok(None)
    }

    fn set(&mut self, key: &str, value: &str) -> WallResult<()> {
        // Keys are unique, so a replace is a plain overwrite.
        let statement = format!("INSERT OR REPLACE INTO {KV_TABLE} (key, value) VALUES (?, ?)");
        let mut stmt = self.conn.prepare(statement)?;
        stmt.bind((1, key))?;
        stmt.bind((2, value))?;
        stmt.next()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{thread_rng, Rng};
    use sqlite::Value;
    use std::path::PathBuf;

    /// Random db path under the temp dir, `wall-xxxxx-xxxxx-xxxxx-xxxxx.db`.
    fn generate_temp_db() -> PathBuf {
        let mut buffer = [0u16; 4];
        thread_rng().fill(&mut buffer);
        let mut name = buffer
            .into_iter()
            .map(|val| format!("{:05}", val))
            .collect::<Vec<String>>()
            .join("-");
        name.insert_str(0, "wall-");
        name.push_str(".db");
        std::env::temp_dir().join(name)
    }

    #[test]
    fn test_setup_tables() {
        let path = generate_temp_db();
        let storage = SqliteStorage::open(&path).unwrap();
        assert!(path.exists(), "Db creation failed at expected path");

        let mut stmt = storage
            .conn
            .prepare(format!("PRAGMA table_info({KV_TABLE});"))
            .unwrap();
        let columns: Vec<Value> = stmt
            .iter()
            .filter_map(|val| val.ok())
            .map(|mut row| row.take(1))
            .collect();
        assert_eq!(
            columns,
            [Value::String("key".into()), Value::String("value".into())]
        );

        drop(stmt);
        drop(storage);
        std::fs::remove_file(path).expect("Db cleanup failed");
    }

    #[test]
    fn test_set_then_get() {
        let path = generate_temp_db();
        let mut storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(storage.get("wall-posts").unwrap(), None);

        storage.set("wall-posts", "[]").unwrap();
        storage.set("wall-posts", r#"[{"id":"1"}]"#).unwrap();
        assert_eq!(
            storage.get("wall-posts").unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );

        drop(storage);
        std::fs::remove_file(path).expect("Db cleanup failed");
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = generate_temp_db();
        {
            let mut storage = SqliteStorage::open(&path).unwrap();
            storage.set("wall-posts", "quoted \"value\"; DROP TABLE kv").unwrap();
        }
        let storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(
            storage.get("wall-posts").unwrap().as_deref(),
            Some("quoted \"value\"; DROP TABLE kv")
        );

        drop(storage);
        std::fs::remove_file(path).expect("Db cleanup failed");
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = generate_temp_db().with_extension("");
        let path = dir.join("data").join("wall.db");
        let storage = SqliteStorage::open(&path).unwrap();
        assert!(path.exists());

        drop(storage);
        std::fs::remove_dir_all(dir).expect("Db cleanup failed");
    }
}
