//! Access-log entries derived from fluorescent points.

use chrono::{DateTime, SecondsFormat, Utc};
use foundation::math::LonLat;
use foundation::time::Millis;
use runtime::EventLog;

use crate::fluorescent::FluorescentPoint;

/// Number of entries the on-page log keeps.
pub const ACCESS_LOG_CAPACITY: usize = 20;

pub type AccessLog = EventLog<LogEntry>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Sequence number of the originating point.
    pub id: u64,
    pub message: String,
    /// CSS hex color of the originating point.
    pub color: String,
}

impl LogEntry {
    pub fn from_point(point: &FluorescentPoint) -> Self {
        Self {
            id: point.seq,
            message: access_message(point.consumer, point.owner),
            color: point.color.hex(),
        }
    }
}

pub fn access_message(consumer: &str, owner: &str) -> String {
    format!("utilisé par {consumer}, généré par {owner}")
}

/// `"{lat}°N, {lon}°E"` with two decimals; southern and western values keep their sign.
pub fn format_location(position: LonLat) -> String {
    format!("{:.2}°N, {:.2}°E", position.lat_deg, position.lon_deg)
}

/// ISO-8601 UTC timestamp with millisecond precision.
///
/// Values outside chrono's range fall back to the raw millisecond count.
pub fn iso_timestamp(at: Millis) -> String {
    match DateTime::<Utc>::from_timestamp_millis(at.0 as i64) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => format!("{}ms", at.0),
    }
}

pub fn trace_data_access(point: &FluorescentPoint) {
    tracing::info!(
        target: "data_access",
        timestamp = %iso_timestamp(point.created),
        location = %format_location(point.position),
        owner = point.owner,
        category = point.category,
        consumer = point.consumer,
        "data access detected"
    );
}
