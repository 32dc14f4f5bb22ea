//! Shared test fixtures: one deleted-only entity and two unrelated
//! snapshot-capable entities over an in-memory schema.
#![allow(dead_code)]

use rowscope_core::{
    open_db_in_memory, read_flag, Entity, FlagColumns, Migration, QueryError, QueryResult,
    SnapshotMark, SoftDelete,
};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub const SCHEMA: &[Migration] = &[
    Migration {
        version: 1,
        sql: "CREATE TABLE notes (
                uuid TEXT PRIMARY KEY,
                body TEXT NOT NULL,
                is_deleted INTEGER NOT NULL DEFAULT 0
              );",
    },
    Migration {
        version: 2,
        sql: "CREATE TABLE documents (
                uuid TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                revision INTEGER NOT NULL DEFAULT 1,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                is_snapshot INTEGER NOT NULL DEFAULT 0
              );",
    },
    Migration {
        version: 3,
        sql: "CREATE TABLE reports (
                uuid TEXT PRIMARY KEY,
                label TEXT NOT NULL,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                is_snapshot INTEGER NOT NULL DEFAULT 0
              );",
    },
];

pub fn open_store() -> Connection {
    open_db_in_memory(SCHEMA).expect("in-memory store should open")
}

fn parse_uuid(text: &str, column: &str) -> QueryResult<Uuid> {
    Uuid::parse_str(text)
        .map_err(|_| QueryError::InvalidData(format!("invalid uuid value `{text}` in {column}")))
}

/// Entity carrying only the tombstone flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub uuid: Uuid,
    pub body: String,
    pub is_deleted: bool,
}

impl Entity for Note {
    const TABLE: &'static str = "notes";
    const COLUMNS: &'static [&'static str] = &["uuid", "body", "is_deleted"];

    fn from_row(row: &Row<'_>) -> QueryResult<Self> {
        let uuid_text: String = row.get("uuid")?;
        Ok(Self {
            uuid: parse_uuid(&uuid_text, "notes.uuid")?,
            body: row.get("body")?,
            is_deleted: read_flag(row, "is_deleted")?,
        })
    }
}

impl SoftDelete for Note {
    const FLAGS: FlagColumns = FlagColumns::DeletedOnly {
        deleted: "is_deleted",
    };

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

/// Entity carrying tombstone and snapshot flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub uuid: Uuid,
    pub title: String,
    pub revision: i64,
    pub is_deleted: bool,
    pub is_snapshot: bool,
}

impl Entity for Document {
    const TABLE: &'static str = "documents";
    const COLUMNS: &'static [&'static str] =
        &["uuid", "title", "revision", "is_deleted", "is_snapshot"];

    fn from_row(row: &Row<'_>) -> QueryResult<Self> {
        let uuid_text: String = row.get("uuid")?;
        Ok(Self {
            uuid: parse_uuid(&uuid_text, "documents.uuid")?,
            title: row.get("title")?,
            revision: row.get("revision")?,
            is_deleted: read_flag(row, "is_deleted")?,
            is_snapshot: read_flag(row, "is_snapshot")?,
        })
    }
}

impl SoftDelete for Document {
    const FLAGS: FlagColumns = FlagColumns::DeletedAndSnapshot {
        deleted: "is_deleted",
        snapshot: "is_snapshot",
    };

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

impl SnapshotMark for Document {
    fn is_snapshot(&self) -> bool {
        self.is_snapshot
    }
}

/// Second snapshot-capable entity, unrelated to `Document`, for exercising
/// capability-generic predicates across concrete types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub uuid: Uuid,
    pub label: String,
    pub is_deleted: bool,
    pub is_snapshot: bool,
}

impl Entity for Report {
    const TABLE: &'static str = "reports";
    const COLUMNS: &'static [&'static str] = &["uuid", "label", "is_deleted", "is_snapshot"];

    fn from_row(row: &Row<'_>) -> QueryResult<Self> {
        let uuid_text: String = row.get("uuid")?;
        Ok(Self {
            uuid: parse_uuid(&uuid_text, "reports.uuid")?,
            label: row.get("label")?,
            is_deleted: read_flag(row, "is_deleted")?,
            is_snapshot: read_flag(row, "is_snapshot")?,
        })
    }
}

impl SoftDelete for Report {
    const FLAGS: FlagColumns = FlagColumns::DeletedAndSnapshot {
        deleted: "is_deleted",
        snapshot: "is_snapshot",
    };

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

impl SnapshotMark for Report {
    fn is_snapshot(&self) -> bool {
        self.is_snapshot
    }
}

pub fn insert_note(conn: &Connection, body: &str, deleted: bool) -> Uuid {
    let uuid = Uuid::new_v4();
    conn.execute(
        "INSERT INTO notes (uuid, body, is_deleted) VALUES (?1, ?2, ?3);",
        params![uuid.to_string(), body, deleted],
    )
    .expect("note should insert");
    uuid
}

pub fn insert_document(conn: &Connection, title: &str, deleted: bool, snapshot: bool) -> Uuid {
    insert_document_rev(conn, title, 1, deleted, snapshot)
}

pub fn insert_document_rev(
    conn: &Connection,
    title: &str,
    revision: i64,
    deleted: bool,
    snapshot: bool,
) -> Uuid {
    let uuid = Uuid::new_v4();
    conn.execute(
        "INSERT INTO documents (uuid, title, revision, is_deleted, is_snapshot)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![uuid.to_string(), title, revision, deleted, snapshot],
    )
    .expect("document should insert");
    uuid
}

pub fn insert_report(conn: &Connection, label: &str, deleted: bool, snapshot: bool) -> Uuid {
    let uuid = Uuid::new_v4();
    conn.execute(
        "INSERT INTO reports (uuid, label, is_deleted, is_snapshot) VALUES (?1, ?2, ?3, ?4);",
        params![uuid.to_string(), label, deleted, snapshot],
    )
    .expect("report should insert");
    uuid
}
