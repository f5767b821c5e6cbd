//! Message families and the `+`-joined type selector.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PathError, SelectorError};

/// NMEA-0183 sentence families the converter can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Gga,
    Rmc,
    Gsv,
    Gsa,
}

impl MessageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gga => "GGA",
            Self::Rmc => "RMC",
            Self::Gsv => "GSV",
            Self::Gsa => "GSA",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = SelectorError;

    /// Case-sensitive: `gga` is rejected.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "GGA" => Ok(Self::Gga),
            "RMC" => Ok(Self::Rmc),
            "GSV" => Ok(Self::Gsv),
            "GSA" => Ok(Self::Gsa),
            other => Err(SelectorError::Invalid(other.to_string())),
        }
    }
}

/// Validated list of requested message types, in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSelector {
    types: Vec<MessageType>,
}

impl TypeSelector {
    /// Parse a selector such as `GGA+RMC+GSV`.
    ///
    /// A single trailing `+` is tolerated; empty segments elsewhere are
    /// rejected as invalid types.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let body = input.strip_suffix('+').unwrap_or(input);
        let mut types = Vec::new();
        for segment in body.split('+') {
            let message: MessageType = segment.parse()?;
            if types.contains(&message) {
                return Err(SelectorError::Duplicate(message));
            }
            types.push(message);
        }
        Ok(Self { types })
    }

    pub fn types(&self) -> &[MessageType] {
        &self.types
    }

    pub fn contains(&self, message: MessageType) -> bool {
        self.types.contains(&message)
    }

    /// GSV output is produced whenever GSV or GSA is requested, since GSA
    /// sentences are derived from the GSV batch.
    pub fn wants_satellites(&self) -> bool {
        self.contains(MessageType::Gsv) || self.contains(MessageType::Gsa)
    }

    /// Check that the inputs needed by every requested family are present.
    pub fn check_paths(&self, dr: Option<&Path>, gnss: Option<&Path>) -> Result<(), PathError> {
        if gnss.is_none() {
            return Err(PathError::MissingGnss);
        }
        if dr.is_none() && self.contains(MessageType::Gga) {
            return Err(PathError::MissingDr(MessageType::Gga));
        }
        Ok(())
    }
}

impl fmt::Display for TypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, message) in self.types.iter().enumerate() {
            if idx > 0 {
                f.write_str("+")?;
            }
            f.write_str(message.as_str())?;
        }
        Ok(())
    }
}
