//! DR/GNSS table to NMEA-0183 conversion.
//!
//! A run resolves a [`ConversionPlan`] from the two tables, then
//! [`RunDriver::run`] aligns each primary tick against the GNSS table and
//! writes GGA, RMC, GSV and GSA sentences line by line.

pub mod align;
pub mod catalog;
pub mod driver;
pub mod error;
pub mod format;
pub mod gps_time;
pub mod output;
pub mod schema;
pub mod segment;
pub mod sentence;

pub use align::{AlignmentOutcome, MissKind, TimeAligner, read_time_key};
pub use catalog::{CnoColumn, ConstellationMap, SatelliteCatalog, SatelliteSlot};
pub use driver::{ConversionPlan, RunDriver, RunSummary, SentenceCounts};
pub use error::{ConvertError, Result};
pub use gps_time::{format_utc_date, format_utc_time, gps_to_utc};
pub use output::{OutputTarget, output_file_name};
pub use schema::{
    AltitudeColumns, ColumnLookup, GgaColumns, GsaColumns, RmcColumns, SchemaResolver,
    TimeColumns,
};
pub use segment::SentenceSegmenter;
pub use sentence::{Sentence, SentenceBuilder, checksum};
