use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::{BookingRequest, BookingRow};

/// Pragmas applied to every connection. WAL lets the per-request reader
/// and writer connections coexist; the busy timeout absorbs writer
/// contention instead of surfacing SQLITE_BUSY.
pub const CONN_PRAGMAS: &str =
    "PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL; PRAGMA busy_timeout = 5000;";

pub fn open_and_init(db_path: &str) -> Result<Connection> {
    let conn = Connection::open(db_path).context("open sqlite db failed")?;

    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;

        CREATE TABLE IF NOT EXISTS bookings (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL,
          email TEXT NOT NULL,
          phone TEXT NOT NULL,
          session_from TEXT NOT NULL,
          session_to TEXT NOT NULL,
          services TEXT,
          special_request TEXT,
          status TEXT NOT NULL DEFAULT 'Pending'
        );

        CREATE TABLE IF NOT EXISTS news (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT NOT NULL,
          content TEXT NOT NULL,
          date_posted TEXT NOT NULL
        );
        "#,
    )
    .context("db init batch failed")?;

    Ok(conn)
}

/// Insert one booking row and return its assigned id. The status column
/// is set by the table default, never by the caller.
pub fn insert_booking(conn: &Connection, req: &BookingRequest) -> rusqlite::Result<i64> {
    conn.execute(
        r#"
        INSERT INTO bookings (
            name, email, phone, session_from, session_to, services, special_request
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            req.name,
            req.email,
            req.phone,
            req.session_from,
            req.session_to,
            req.services,
            req.special_request
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Fetch every booking row. No ORDER BY clause: callers get rows in
/// whatever order SQLite returns them.
pub fn get_all_bookings(conn: &Connection) -> rusqlite::Result<Vec<BookingRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, phone, session_from, session_to, services, special_request, status
         FROM bookings",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(BookingRow {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            session_from: row.get(4)?,
            session_to: row.get(5)?,
            services: row.get(6)?,
            special_request: row.get(7)?,
            status: row.get(8)?,
        })
    })?;

    rows.collect()
}
