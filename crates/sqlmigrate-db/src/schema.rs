//! The embedded schema as an ordered list of versioned definitions.
//!
//! Entries are applied in slice order. Later entries may depend on earlier
//! ones (an index on its table, the junction table on both of its parents),
//! so new definitions are appended, never inserted.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Table,
    Index,
}

/// A single schema object definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatement {
    pub version: u32,
    pub name: &'static str,
    pub kind: ObjectKind,
    pub sql: &'static str,
}

static EMBEDDED_SCHEMA: [SchemaStatement; 5] = [
    SchemaStatement {
        version: 1,
        name: "machine",
        kind: ObjectKind::Table,
        sql: "CREATE TABLE IF NOT EXISTS machine (
    uuid        TEXT PRIMARY KEY,
    machine_id  TEXT NOT NULL
);",
    },
    SchemaStatement {
        version: 1,
        name: "idx_machine_id",
        kind: ObjectKind::Index,
        sql: "CREATE UNIQUE INDEX IF NOT EXISTS idx_machine_id
ON machine (machine_id);",
    },
    SchemaStatement {
        version: 1,
        name: "filesystem",
        kind: ObjectKind::Table,
        sql: "CREATE TABLE IF NOT EXISTS filesystem (
    uuid           TEXT PRIMARY KEY,
    filesystem_id  TEXT NOT NULL,
    life_id        INT NOT NULL DEFAULT 0,
    provider_id    TEXT
);",
    },
    SchemaStatement {
        version: 1,
        name: "idx_filesystem_id",
        kind: ObjectKind::Index,
        sql: "CREATE UNIQUE INDEX IF NOT EXISTS idx_filesystem_id
ON filesystem (filesystem_id);",
    },
    SchemaStatement {
        version: 1,
        name: "machine_filesystem",
        kind: ObjectKind::Table,
        sql: "CREATE TABLE IF NOT EXISTS machine_filesystem (
    machine_uuid     TEXT NOT NULL,
    filesystem_uuid  TEXT NOT NULL,
    CONSTRAINT fk_machine_filesystem_machine
        FOREIGN KEY (machine_uuid)
        REFERENCES machine(uuid),
    CONSTRAINT fk_machine_filesystem_filesystem
        FOREIGN KEY (filesystem_uuid)
        REFERENCES filesystem(uuid),
    PRIMARY KEY (machine_uuid, filesystem_uuid)
);",
    },
];

pub fn embedded_schema() -> &'static [SchemaStatement] {
    &EMBEDDED_SCHEMA
}

/// Highest version present in the embedded schema.
pub fn schema_version() -> u32 {
    EMBEDDED_SCHEMA
        .iter()
        .map(|def| def.version)
        .max()
        .unwrap_or(0)
}
