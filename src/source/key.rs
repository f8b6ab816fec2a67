//! Blob key parsing for core analytics paths.
//!
//! Diagnostic blobs are keyed by the CDN endpoint's resource id plus an
//! hourly date partition:
//!
//! `.../SUBSCRIPTIONS/{sub}/RESOURCEGROUPS/{group}/PROVIDERS/{provider}/PROFILES/{profile}/ENDPOINTS/{endpoint}/y={y}/m={m}/d={d}/h={h}/m={min}/PT1H.json`
//!
//! Keys are matched against a template with named captures rather than by
//! segment index, so the layout can change without recounting positions.
//! Segment names match case-insensitively; one arbitrary leading segment
//! (e.g. `resourceId=`) is tolerated.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use snafu::prelude::*;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{InvalidTimestampSnafu, KeyError, TemplateMismatchSnafu};

static KEY_TEMPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
        ^
        (?: [^/]* / )?              # optional leading segment, e.g. 'resourceId='
        SUBSCRIPTIONS / [^/]+ /
        RESOURCEGROUPS / [^/]+ /
        PROVIDERS / [^/]+ /
        PROFILES / (?P<profile>[^/]+) /
        ENDPOINTS / (?P<endpoint>[^/]+) /
        y= (?P<y>[0-9]+) /
        m= (?P<m>[0-9]+) /
        d= (?P<d>[0-9]+) /
        h= (?P<h>[0-9]+) /
        m= (?P<min>[0-9]+) /
        [^/]+
        $
        ",
    )
    .expect("invalid key template pattern")
});

/// Identifying fields parsed from one blob key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobKey {
    /// CDN profile name, verbatim from the key.
    pub profile: String,
    /// CDN endpoint name, verbatim from the key.
    pub endpoint: String,
    /// Start of the record's hour window (naive, seconds fixed to 0).
    pub time: NaiveDateTime,
}

impl BlobKey {
    /// Parse a blob key against the core analytics template.
    ///
    /// Fails on any key that does not match the layout or whose date
    /// segments do not form a valid timestamp.
    pub fn parse(key: &str) -> Result<Self, KeyError> {
        let caps = KEY_TEMPLATE
            .captures(key)
            .context(TemplateMismatchSnafu { key })?;

        let year: i32 = parse_field(&caps, "y", key)?;
        let month: u32 = parse_field(&caps, "m", key)?;
        let day: u32 = parse_field(&caps, "d", key)?;
        let hour: u32 = parse_field(&caps, "h", key)?;
        let minute: u32 = parse_field(&caps, "min", key)?;

        let time = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .context(InvalidTimestampSnafu { key })?;

        Ok(Self {
            profile: caps["profile"].to_string(),
            endpoint: caps["endpoint"].to_string(),
            time,
        })
    }
}

fn parse_field<T: FromStr>(caps: &regex::Captures, name: &str, key: &str) -> Result<T, KeyError> {
    caps[name].parse().ok().context(InvalidTimestampSnafu { key })
}
