pub mod config;
pub mod constellation;
pub mod error;
pub mod message;
pub mod record;

pub use config::{ConversionConfig, HeaderNames};
pub use constellation::{Constellation, ConstellationKind};
pub use error::{PathError, SchemaError, SelectorError, TableRole};
pub use message::{MessageType, TypeSelector};
pub use record::{CnoReading, SatelliteRecord, TimeKey};
