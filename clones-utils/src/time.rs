use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeDelta,
    TimeZone, Utc,
};

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// The zone naive timestamps are read in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LocalZone {
    /// The host system's local zone, DST included.
    #[default]
    System,
    Fixed(FixedOffset),
}

impl LocalZone {
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Resolve a wall-clock time in this zone. Ambiguous times take the
    /// earlier instant; times inside a DST gap have no instant.
    pub fn resolve(self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::System => earliest_utc(Local.from_local_datetime(&naive)),
            Self::Fixed(offset) => earliest_utc(offset.from_local_datetime(&naive)),
        }
    }

    /// Minutes to add to local time to reach UTC at `instant`
    /// (positive west of Greenwich, e.g. `-120` for UTC+02:00).
    pub fn timezone_offset_minutes(self, instant: DateTime<Utc>) -> i64 {
        let local_minus_utc = match self {
            Self::System => instant.with_timezone(&Local).offset().fix().local_minus_utc(),
            Self::Fixed(offset) => offset.local_minus_utc(),
        };

        -i64::from(local_minus_utc) / 60
    }
}

fn earliest_utc<Tz: TimeZone>(result: LocalResult<DateTime<Tz>>) -> Option<DateTime<Utc>> {
    result.earliest().map(|value| value.with_timezone(&Utc))
}

/// Parse a timestamp into an absolute instant.
///
/// RFC 3339 values, and offset-suffixed values without seconds or with a
/// `+hhmm` offset, carry their own offset. Naive date-times are read in
/// `zone`; a bare date is UTC midnight.
pub fn parse_instant(raw: &str, zone: LocalZone) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(parsed) = parse_with_offset(value) {
        return Some(parsed);
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return zone.resolve(naive);
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

fn parse_with_offset(value: &str) -> Option<DateTime<Utc>> {
    let with_offset = match value.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => value.to_owned(),
    };

    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&with_offset, format).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Parse a timestamp reading naive date-times as UTC.
pub fn parse_instant_utc(raw: &str) -> Option<DateTime<Utc>> {
    parse_instant(raw, LocalZone::utc())
}

/// Read `raw` as local time and shift it by the zone's UTC offset, so that
/// the result is `epoch + offset_minutes * 60_000`.
pub fn local_to_utc(raw: &str, zone: LocalZone) -> Option<DateTime<Utc>> {
    let instant = parse_instant(raw, zone)?;
    let shift = TimeDelta::try_minutes(zone.timezone_offset_minutes(instant))?;

    instant.checked_add_signed(shift)
}
