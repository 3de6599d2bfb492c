use std::{fs, path::Path};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use super::{
    common::Gender,
    identity::{self, IdNumber},
    locations::LocationMap,
};
use crate::error::{EntryError, RosterError};

/// Separator between the name and the identity number of a roster entry.
pub const PAIR_SEPARATOR: &str = "----";

/// [PersonRecord] is one row of the output report. Field order is the
/// column order of [REPORT_HEADERS](super::report::REPORT_HEADERS).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRecord {
    pub name: String,

    #[serde(serialize_with = "serialize_id_number")]
    pub id_number: IdNumber,

    pub birth_date: NaiveDate,

    pub age: u32,

    pub gender: Gender,

    pub city: String,
}

fn serialize_id_number<S>(id_number: &IdNumber, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(id_number.as_str())
}

/// [SkippedEntry] keeps a roster token that could not be turned into a
/// [PersonRecord], together with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub entry: String,
    pub reason: EntryError,
}

/// [Roster] is the outcome of parsing a whole roster: the good records in
/// input order and everything that was skipped.
#[derive(Debug, Default)]
pub struct Roster {
    pub records: Vec<PersonRecord>,
    pub skipped: Vec<SkippedEntry>,
}

pub fn parse_entry(
    entry: &str,
    locations: &LocationMap,
    as_of: NaiveDate,
) -> Result<PersonRecord, EntryError> {
    let mut parts = entry.split(PAIR_SEPARATOR);
    let (Some(name), Some(raw_id), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(EntryError::MalformedPair);
    };
    if name.is_empty() {
        return Err(EntryError::EmptyName);
    }

    let id_number = IdNumber::parse(raw_id)?;
    let decoded = identity::decode(&id_number, locations, as_of)?;
    if !id_number.checksum_is_valid() {
        warn!(%id_number, "identity number check character does not match");
    }

    Ok(PersonRecord {
        name: name.to_string(),
        id_number,
        birth_date: decoded.birth_date,
        age: decoded.age,
        gender: decoded.gender,
        city: decoded.city,
    })
}

/// Parses every whitespace separated entry of `content`. Bad entries are
/// logged and collected in [Roster::skipped], never fatal.
pub fn parse_roster(content: &str, locations: &LocationMap, as_of: NaiveDate) -> Roster {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut roster = Roster::default();
    for entry in content.split_whitespace() {
        match parse_entry(entry, locations, as_of) {
            Ok(record) => roster.records.push(record),
            Err(reason) => {
                warn!("跳过错误数据：{entry}，错误原因：{reason}");
                roster.skipped.push(SkippedEntry {
                    entry: entry.to_string(),
                    reason,
                });
            }
        }
    }
    roster
}

pub fn read_roster<P: AsRef<Path>>(
    path: P,
    locations: &LocationMap,
    as_of: NaiveDate,
) -> Result<Roster, RosterError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let roster = parse_roster(&content, locations, as_of);
    info!(
        path = %path.display(),
        parsed = roster.records.len(),
        skipped = roster.skipped.len(),
        "read roster"
    );
    Ok(roster)
}
