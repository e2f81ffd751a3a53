use std::path::Path;

use anyhow::Context as _;
use chrono::NaiveDate;
use rusqlite::Connection;
use rusqlite::types::Value;

/// Display and input format for entry dates.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// A persisted work-log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,
    pub name: String,
    pub task: String,
    pub spent_minutes: u32,
    pub notes: String,
    pub timestamp: NaiveDate,
}

/// Field values for an entry that has not been stored yet.
///
/// `timestamp` defaults to the local date at insert time when `None`.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub name: String,
    pub task: String,
    pub spent_minutes: u32,
    pub notes: String,
    pub timestamp: Option<NaiveDate>,
}

/// Predicate applied by [`EntryStore::query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    /// Case-sensitive substring match on the employee name.
    NameContains(String),
    NameEquals(String),
    OnDate(NaiveDate),
    /// Both ends inclusive.
    DateRange {
        start: NaiveDate,
        end: NaiveDate,
    },
    SpentMinutes(u32),
    /// Case-sensitive substring match on task or notes. Empty matches everything.
    SearchTerm(String),
}

impl Filter {
    /// Returns the `WHERE` fragment (empty for [`Filter::All`]) and its positional parameters.
    fn to_sql(&self) -> (String, Vec<Value>) {
        match self {
            Self::All => (String::new(), Vec::new()),
            Self::NameContains(s) => (
                "WHERE instr(name, ?1) > 0".to_owned(),
                vec![Value::Text(s.clone())],
            ),
            Self::NameEquals(s) => ("WHERE name = ?1".to_owned(), vec![Value::Text(s.clone())]),
            Self::OnDate(d) => ("WHERE timestamp = ?1".to_owned(), vec![date_value(*d)]),
            Self::DateRange { start, end } => match end.succ_opt() {
                Some(after_end) => (
                    "WHERE timestamp >= ?1 AND timestamp < ?2".to_owned(),
                    vec![date_value(*start), date_value(after_end)],
                ),
                None => (
                    "WHERE timestamp >= ?1 AND timestamp <= ?2".to_owned(),
                    vec![date_value(*start), date_value(*end)],
                ),
            },
            Self::SpentMinutes(m) => (
                "WHERE spent_minutes = ?1".to_owned(),
                vec![Value::Integer(i64::from(*m))],
            ),
            Self::SearchTerm(s) => (
                "WHERE ?1 = '' OR instr(task, ?1) > 0 OR instr(notes, ?1) > 0".to_owned(),
                vec![Value::Text(s.clone())],
            ),
        }
    }
}

// ISO dates compare chronologically as text.
fn date_value(date: NaiveDate) -> Value {
    Value::Text(date.format("%Y-%m-%d").to_string())
}

/// The local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Owns the `SQLite` connection holding the `entries` table.
pub struct EntryStore {
    conn: Connection,
}

impl EntryStore {
    /// Open or create the store at `path`, creating parent directories and the schema.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the DB cannot be opened,
    /// or the schema cannot be created.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create db dir {}", parent.display()))?;
        }
        let conn =
            Connection::open(path).with_context(|| format!("open db at {}", path.display()))?;
        tracing::debug!(path = %path.display(), "opened entry store");
        Self::from_connection(conn)
    }

    /// Open a throwaway store that lives only as long as the returned value.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory db")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> anyhow::Result<Self> {
        init_entries_table(&conn)?;
        Ok(Self { conn })
    }

    /// Insert a new entry and return it with its assigned id.
    ///
    /// # Errors
    /// Returns an error if `name` or `task` is blank, or the INSERT fails.
    pub fn create(&self, new_entry: &NewEntry) -> anyhow::Result<Entry> {
        if new_entry.name.trim().is_empty() {
            anyhow::bail!("entry name must not be blank");
        }
        if new_entry.task.trim().is_empty() {
            anyhow::bail!("entry task must not be blank");
        }
        let timestamp = new_entry.timestamp.unwrap_or_else(today);
        self.conn
            .execute(
                "INSERT INTO entries (name, task, spent_minutes, notes, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    new_entry.name,
                    new_entry.task,
                    new_entry.spent_minutes,
                    new_entry.notes,
                    timestamp
                ],
            )
            .context("insert entry")?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name = %new_entry.name, "created entry");
        Ok(Entry {
            id,
            name: new_entry.name.clone(),
            task: new_entry.task.clone(),
            spent_minutes: new_entry.spent_minutes,
            notes: new_entry.notes.clone(),
            timestamp,
        })
    }

    /// Entries matching `filter`, in insertion order.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn query(&self, filter: &Filter) -> anyhow::Result<Vec<Entry>> {
        let (where_clause, values) = filter.to_sql();
        let sql = format!(
            "SELECT id, name, task, spent_minutes, notes, timestamp
             FROM entries
             {where_clause}
             ORDER BY id ASC"
        );
        let mut stmt = self.conn.prepare(&sql).context("prepare entry query")?;
        let rows = stmt.query_map(rusqlite::params_from_iter(values.iter()), map_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row.context("read entry row")?);
        }
        tracing::debug!(?filter, matched = result.len(), "queried entries");
        Ok(result)
    }

    /// Every stored entry, in insertion order.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn all(&self) -> anyhow::Result<Vec<Entry>> {
        self.query(&Filter::All)
    }

    /// Persist the current field values of `entry` over the stored row with the same id.
    ///
    /// # Errors
    /// Returns an error if the UPDATE fails or no row has `entry.id`.
    pub fn update(&self, entry: &Entry) -> anyhow::Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE entries
                 SET name = ?1, task = ?2, spent_minutes = ?3, notes = ?4, timestamp = ?5
                 WHERE id = ?6",
                rusqlite::params![
                    entry.name,
                    entry.task,
                    entry.spent_minutes,
                    entry.notes,
                    entry.timestamp,
                    entry.id
                ],
            )
            .context("update entry")?;
        if changed == 0 {
            anyhow::bail!("entry {} not found", entry.id);
        }
        tracing::debug!(id = entry.id, "updated entry");
        Ok(())
    }

    /// Permanently remove `entry`.
    ///
    /// # Errors
    /// Returns an error if the DELETE fails or no row has `entry.id`.
    pub fn delete(&self, entry: &Entry) -> anyhow::Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1", [entry.id])
            .context("delete entry")?;
        if changed == 0 {
            anyhow::bail!("entry {} not found", entry.id);
        }
        tracing::debug!(id = entry.id, "deleted entry");
        Ok(())
    }

    /// Distinct employee names, sorted.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn distinct_names(&self) -> anyhow::Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT name FROM entries ORDER BY name ASC")?;
        let rows = stmt.query_map([], |r| r.get(0))?;
        let mut names = Vec::new();
        for row in rows {
            names.push(row.context("read name row")?);
        }
        Ok(names)
    }

    /// Distinct entry dates, oldest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn distinct_dates(&self) -> anyhow::Result<Vec<NaiveDate>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT timestamp FROM entries ORDER BY timestamp ASC")?;
        let rows = stmt.query_map([], |r| r.get(0))?;
        let mut dates = Vec::new();
        for row in rows {
            dates.push(row.context("read date row")?);
        }
        Ok(dates)
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub fn count(&self) -> anyhow::Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |r| r.get(0))
            .context("count entries")?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

/// Create the `entries` table and its indexes if missing.
///
/// # Errors
/// Returns an error if the table creation fails.
pub fn init_entries_table(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS entries (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT    NOT NULL,
            task           TEXT    NOT NULL,
            spent_minutes  INTEGER NOT NULL CHECK (spent_minutes >= 0),
            notes          TEXT    NOT NULL DEFAULT '',
            timestamp      TEXT    NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_entries_name ON entries(name);
        CREATE INDEX IF NOT EXISTS idx_entries_timestamp ON entries(timestamp);",
    )
    .context("create entries table")?;
    Ok(())
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        name: row.get(1)?,
        task: row.get(2)?,
        spent_minutes: row.get(3)?,
        notes: row.get(4)?,
        timestamp: row.get(5)?,
    })
}
