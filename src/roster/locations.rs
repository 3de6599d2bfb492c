use std::{collections::HashMap, fs::File, io::BufReader, io::Read, path::Path};

use serde::Deserialize;
use tracing::{debug, info};

use super::common::AddressCode;
use crate::error::LocationError;

/// City name reported for address codes missing from the table.
pub const UNKNOWN_LOCATION: &str = "未知地址";

/// [InputLocationTable](InputLocationTable) is used as a deserialization
/// helper struct ONLY and should not be used for anything else.
#[derive(Debug, Deserialize)]
struct InputLocationTable {
    #[serde(rename = "T_Location")]
    entries: Vec<InputLocationRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InputLocationRecord {
    #[serde(rename = "bm")]
    code: Option<String>,

    #[serde(rename = "dq")]
    district: Option<String>,

    province: Option<String>,

    #[serde(rename = "qy")]
    region: Option<String>,
}

impl InputLocationRecord {
    /// `dq` when it is present and non-empty, otherwise province + region.
    fn display_name(self) -> String {
        match self.district {
            Some(district) if !district.is_empty() => district,
            _ => {
                let mut name = self.province.unwrap_or_default();
                name.push_str(self.region.as_deref().unwrap_or_default());
                name
            }
        }
    }
}

/// [LocationMap] maps address codes to the city names printed in the report.
#[derive(Debug, Default, Clone)]
pub struct LocationMap {
    cities: HashMap<AddressCode, String>,
}

impl LocationMap {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LocationError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LocationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), entries = map.len(), "loaded location table");
        Ok(map)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LocationError> {
        let table: InputLocationTable = serde_json::from_reader(reader)?;
        let mut cities = HashMap::with_capacity(table.entries.len());
        for record in table.entries {
            let code = record.code.as_deref().map(str::trim).unwrap_or_default();
            if code.is_empty() {
                debug!("skipping location entry without code");
                continue;
            }
            let code = AddressCode::new(code);
            // later duplicates overwrite earlier ones
            cities.insert(code, record.display_name());
        }
        Ok(Self { cities })
    }

    /// Returns the city for `code`, or [UNKNOWN_LOCATION].
    pub fn city(&self, code: &AddressCode) -> &str {
        self.cities
            .get(code)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LOCATION)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl FromIterator<(AddressCode, String)> for LocationMap {
    fn from_iter<T: IntoIterator<Item = (AddressCode, String)>>(iter: T) -> Self {
        Self {
            cities: iter.into_iter().collect(),
        }
    }
}
