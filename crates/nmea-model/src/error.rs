//! Fatal diagnostics raised before a conversion starts.

use std::fmt;

use thiserror::Error;

use crate::message::MessageType;

/// Which input table a header or row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TableRole {
    /// Dead-reckoning table.
    Dr,
    /// Raw GNSS table.
    Gnss,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dr => f.write_str("DR"),
            Self::Gnss => f.write_str("GNSS"),
        }
    }
}

/// A required header could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{family}: header `{header}` not found in {table} table")]
    MissingHeader {
        family: MessageType,
        table: TableRole,
        header: String,
    },

    #[error("time alignment: header `{header}` not found in {table} table")]
    MissingTimeHeader { table: TableRole, header: String },

    #[error("neither `{msl}` nor `{wgs84}` found in {table} table")]
    NoAltitude {
        table: TableRole,
        msl: String,
        wgs84: String,
    },

    #[error("no satellite columns found in GNSS table")]
    NoSatellites,
}

/// The message type selector is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("invalid message type `{0}` (expected GGA, RMC, GSV or GSA)")]
    Invalid(String),

    #[error("duplicated message type `{0}`")]
    Duplicate(MessageType),
}

/// A required input path is absent for the requested message types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("{0} requires both the DR and the GNSS table")]
    MissingDr(MessageType),

    #[error("the GNSS table path is required")]
    MissingGnss,
}
