//! CLI library components for the table-to-NMEA converter.

pub mod interactive;
pub mod logging;
pub mod pipeline;
