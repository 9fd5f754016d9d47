//! Serde support for [`TlkStringTable`], converting through a UTF-8 shadow
//! type so the JSON form is plain `id -> string` maps.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use widestring::U16String;

use crate::types::TlkStringTable;

/// UTF-8 form of a talk table used for serialization
#[derive(Serialize, Deserialize)]
pub(crate) struct RawStringTable {
    version: u32,
    min_version: u32,
    male: IndexMap<u32, String>,
    female: IndexMap<u32, String>,
}

fn to_utf16(table: IndexMap<u32, String>) -> IndexMap<u32, U16String> {
    table
        .into_iter()
        .map(|(id, text)| (id, U16String::from_str(&text)))
        .collect()
}

fn to_utf8(table: IndexMap<u32, U16String>) -> IndexMap<u32, String> {
    table
        .into_iter()
        .map(|(id, text)| (id, text.to_string_lossy()))
        .collect()
}

impl From<RawStringTable> for TlkStringTable {
    fn from(value: RawStringTable) -> Self {
        Self {
            version: value.version,
            min_version: value.min_version,
            male: to_utf16(value.male),
            female: to_utf16(value.female),
        }
    }
}

impl From<TlkStringTable> for RawStringTable {
    fn from(value: TlkStringTable) -> Self {
        Self {
            version: value.version,
            min_version: value.min_version,
            male: to_utf8(value.male),
            female: to_utf8(value.female),
        }
    }
}
