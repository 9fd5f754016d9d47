//! Base types for the structure of a TLK file.

use binrw::{BinRead, BinWrite};
use derive_more::Display;
use indexmap::IndexMap;
use widestring::U16String;

/// TLK file header
///
/// Defines the header of the TLK file which always starts with the magic number
/// 0x006B6C54 ("Tlk\0"). All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(magic = b"Tlk\0", little)]
pub struct TlkHeader {
    /// Format version of this file
    pub version: u32,

    /// The oldest reader version able to parse this file
    pub min_version: u32,

    /// The number of entries stored in the male table
    pub male_entries: u32,

    /// The number of entries stored in the female table
    pub female_entries: u32,

    /// The number of nodes in the flattened huffman tree
    pub tree_nodes: u32,

    /// The size in bytes of the huffman encoded data section
    pub data_length: u32,
}

/// TLK entry record
///
/// Locates one encoded string within the shared data section
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct TlkEntry {
    /// The string id used for lookup
    pub id: u32,

    /// The zero based bit position where this string's encoded bits begin
    pub bit_offset: u32,
}

/// TLK huffman node record
///
/// One `(left, right)` pair of the flattened tree. A non-negative value is the
/// index of a child node; a negative value is a leaf storing the bitwise
/// complement of a UTF-16 code unit
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct TlkNode {
    /// Child selected by a `0` bit
    pub left: i32,

    /// Child selected by a `1` bit
    pub right: i32,
}

/// Selects one of the two entry tables of a TLK file
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// The male variant table
    #[display("male")]
    Male,

    /// The female variant table
    #[display("female")]
    Female,
}

/// Ordered collection of `(id, bit offset)` pairs for one gender table.
///
/// Entries keep their file order; lookup is by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryTable(IndexMap<u32, u32>);

impl EntryTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with space reserved for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Appends an entry, preserving insertion order. Returns `false` without
    /// replacing anything if the id is already present
    pub fn insert(&mut self, id: u32, bit_offset: u32) -> bool {
        if self.0.contains_key(&id) {
            return false;
        }
        self.0.insert(id, bit_offset);
        true
    }

    /// Looks up the bit offset recorded for `id`
    pub fn lookup(&self, id: u32) -> Option<u32> {
        self.0.get(&id).copied()
    }

    /// Iterates the entries in file order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(id, offset)| (*id, *offset))
    }

    /// Number of entries in this table
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this table contains no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A fully resolved talk table: every entry of both gender tables decoded to
/// text, together with the header versions so a decode/edit/encode cycle can
/// preserve them.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        from = "crate::serde::RawStringTable",
        into = "crate::serde::RawStringTable"
    )
)]
pub struct TlkStringTable {
    /// Format version carried over from the header
    pub version: u32,
    /// Minimum reader version carried over from the header
    pub min_version: u32,
    /// Male entries in file order
    pub male: IndexMap<u32, U16String>,
    /// Female entries in file order
    pub female: IndexMap<u32, U16String>,
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::{BinRead, BinWrite};
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::types::{EntryTable, TlkEntry, TlkHeader, TlkNode};

    #[test]
    fn read_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x54, 0x6C, 0x6B, 0x00,
            0x03, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
        ]);

        let expected = TlkHeader {
            version: 3,
            min_version: 2,
            male_entries: 1,
            female_entries: 0,
            tree_nodes: 1,
            data_length: 1,
        };

        assert_eq!(TlkHeader::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn read_header_invalid_magic() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x54, 0x6C, 0x6B, 0x01,
            0x03, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
        ]);

        assert!(TlkHeader::read(&mut input).is_err());
    }

    #[test]
    fn write_header() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x54, 0x6C, 0x6B, 0x00,
            0x03, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
        ];

        let header = TlkHeader {
            version: 3,
            min_version: 2,
            male_entries: 1,
            female_entries: 0,
            tree_nodes: 1,
            data_length: 1,
        };

        let mut actual = Vec::new();
        header.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn read_entry() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x64, 0x00, 0x00, 0x00,
            0x2A, 0x00, 0x00, 0x00,
        ]);

        let expected = TlkEntry {
            id: 100,
            bit_offset: 42,
        };

        assert_eq!(TlkEntry::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn write_node_with_leaves() -> Result<()> {
        // left leaf 'A' (-66), right leaf null (-1)
        #[rustfmt::skip]
        let expected = vec![
            0xBE, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFF,
        ];

        let node = TlkNode {
            left: -66,
            right: -1,
        };

        let mut actual = Vec::new();
        node.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn entry_table_preserves_file_order() {
        let mut table = EntryTable::new();
        assert!(table.insert(7, 100));
        assert!(table.insert(3, 200));
        assert!(table.insert(5, 300));

        let order: Vec<(u32, u32)> = table.iter().collect();
        assert_eq!(order, vec![(7, 100), (3, 200), (5, 300)]);

        assert_eq!(table.lookup(3), Some(200));
        assert_eq!(table.lookup(4), None);
    }

    #[test]
    fn entry_table_rejects_duplicates() {
        let mut table = EntryTable::new();
        assert!(table.insert(7, 100));
        assert!(!table.insert(7, 200));

        // The original entry is untouched
        assert_eq!(table.lookup(7), Some(100));
        assert_eq!(table.len(), 1);
    }
}
