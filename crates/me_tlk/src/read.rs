//! Types for reading TLK talk table files
//!

use binrw::BinRead;
use indexmap::IndexMap;
use std::io::{Cursor, Read, Seek, SeekFrom};
use tracing::{instrument, warn};
use widestring::U16String;

use crate::bits::BitReader;
use crate::error::{Error, Result};
use crate::huffman::HuffmanTree;
use crate::types::{EntryTable, Gender, TlkEntry, TlkHeader, TlkNode, TlkStringTable};

/// TLK file reader
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_entries(reader: impl Read + Seek) -> me_tlk::error::Result<()> {
///     let tlk = me_tlk::TlkDocument::new(reader)?;
///
///     for (id, text) in &tlk.decode_all().male {
///         println!("{}: {}", id, text.display());
///     }
///
///     Ok(())
/// }
/// ```
pub struct TlkDocument {
    header: TlkHeader,
    male: EntryTable,
    female: EntryTable,
    tree: HuffmanTree,
    data: Vec<u8>,
}

impl TlkDocument {
    /// Read a TLK file, collecting its entry tables, huffman tree and data
    /// section. The file length must match the counts declared in the header
    /// exactly; strings are not decoded until asked for
    #[instrument(skip(reader), err)]
    pub fn new<R: Read + Seek>(mut reader: R) -> Result<TlkDocument> {
        let total_length = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let header = TlkHeader::read(&mut reader).map_err(map_read_error)?;

        let entry_bytes = 8 * (header.male_entries as u64 + header.female_entries as u64);
        let expected = 28 + entry_bytes + 8 * header.tree_nodes as u64 + header.data_length as u64;

        if total_length < expected {
            return Err(Error::TruncatedFile);
        }
        if total_length > expected {
            return Err(Error::TrailingData(total_length - expected));
        }

        let male = Self::read_entries(&mut reader, header.male_entries, Gender::Male)?;
        let female = Self::read_entries(&mut reader, header.female_entries, Gender::Female)?;

        let mut records = Vec::with_capacity(header.tree_nodes as usize);
        for _ in 0..header.tree_nodes {
            records.push(TlkNode::read(&mut reader).map_err(map_read_error)?);
        }
        let tree = HuffmanTree::from_wire(&records);

        let mut data = vec![0u8; header.data_length as usize];
        reader.read_exact(&mut data)?;

        Ok(TlkDocument {
            header,
            male,
            female,
            tree,
            data,
        })
    }

    /// Parse a TLK file held in memory
    pub fn parse(bytes: &[u8]) -> Result<TlkDocument> {
        Self::new(Cursor::new(bytes))
    }

    fn read_entries<R: Read + Seek>(
        reader: &mut R,
        count: u32,
        gender: Gender,
    ) -> Result<EntryTable> {
        let mut table = EntryTable::with_capacity(count as usize);
        for _ in 0..count {
            let entry = TlkEntry::read(reader).map_err(map_read_error)?;
            if !table.insert(entry.id, entry.bit_offset) {
                return Err(Error::DuplicateId {
                    id: entry.id,
                    gender,
                });
            }
        }
        Ok(table)
    }

    /// Format version from the header
    pub fn version(&self) -> u32 {
        self.header.version
    }

    /// Minimum reader version from the header
    pub fn min_version(&self) -> u32 {
        self.header.min_version
    }

    /// The entry table for one gender, in file order
    pub fn entries(&self, gender: Gender) -> &EntryTable {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    /// The shared huffman tree
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Decode a single entry by id. Entries are independent: a malformed
    /// stream only fails the entry that reaches it
    pub fn decode(&self, id: u32, gender: Gender) -> Result<U16String> {
        let offset = self
            .entries(gender)
            .lookup(id)
            .ok_or(Error::EntryNotFound { id, gender })?;

        let mut reader = BitReader::new(&self.data, offset as usize);
        self.tree.decode_string(&mut reader)
    }

    /// Decode every entry of both tables into a resolved string table.
    /// Entries whose bit streams are malformed are skipped with a warning
    /// rather than failing the rest of the file
    #[instrument(skip(self))]
    pub fn decode_all(&self) -> TlkStringTable {
        TlkStringTable {
            version: self.header.version,
            min_version: self.header.min_version,
            male: self.decode_table(Gender::Male),
            female: self.decode_table(Gender::Female),
        }
    }

    fn decode_table(&self, gender: Gender) -> IndexMap<u32, U16String> {
        let table = self.entries(gender);
        let mut values = IndexMap::with_capacity(table.len());

        for (id, offset) in table.iter() {
            let mut reader = BitReader::new(&self.data, offset as usize);
            match self.tree.decode_string(&mut reader) {
                Ok(text) => {
                    values.insert(id, text);
                }
                Err(err) => warn!("skipping {gender} entry {id}: {err}"),
            }
        }

        values
    }
}

/// Folds binrw failures into the crate's parse error taxonomy
fn map_read_error(err: binrw::Error) -> Error {
    match err {
        binrw::Error::BadMagic { .. } => Error::InvalidMagic,
        binrw::Error::Io(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => {
            Error::TruncatedFile
        }
        binrw::Error::Backtrace(backtrace) => map_read_error(*backtrace.error),
        err => Error::BinRWError(err),
    }
}
