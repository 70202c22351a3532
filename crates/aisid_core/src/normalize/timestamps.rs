use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use tracing::debug;

use crate::error::AppError;

// Zone-less forms produced by `datetime-local` inputs and hand-typed dates. Interpreted as UTC.
const ZONELESS_FORMATS: [&[BorrowedFormatItem<'static>]; 4] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
];

fn parse_zoneless(raw: &str) -> Option<OffsetDateTime> {
    ZONELESS_FORMATS.iter().find_map(|fmt| {
        PrimitiveDateTime::parse(raw, *fmt)
            .ok()
            .map(PrimitiveDateTime::assume_utc)
    })
}

/// Parse a user-entered occurrence timestamp into UTC.
///
/// Contract:
/// - Blank input yields `Ok(None)` so the caller can report "required" separately.
/// - RFC3339 with any offset is accepted and shifted to UTC.
/// - Zone-less `YYYY-MM-DD[T ]HH:MM[:SS]` is accepted and read as UTC.
/// - Anything else is `TS_UNPARSEABLE` (no fuzzy guessing).
pub fn parse_timestamp(raw_input: &str) -> Result<Option<OffsetDateTime>, AppError> {
    let trimmed = raw_input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(Some(dt.to_offset(UtcOffset::UTC)));
    }

    if let Some(dt) = parse_zoneless(trimmed) {
        debug!(value = %trimmed, "assumed UTC for zone-less timestamp");
        return Ok(Some(dt));
    }

    Err(AppError::new("TS_UNPARSEABLE", "Unparseable timestamp")
        .with_details(format!("raw={trimmed}")))
}

/// RFC3339 rendering used for JSON-free text output.
pub fn to_rfc3339(ts: OffsetDateTime) -> Result<String, AppError> {
    ts.to_offset(UtcOffset::UTC).format(&Rfc3339).map_err(|e| {
        AppError::new("TS_FORMAT_FAILED", "Failed to format timestamp").with_details(e.to_string())
    })
}
