//! Types for writing TLK talk table files
//!

use binrw::BinWrite;
use bon::Builder;
use indexmap::IndexMap;
use std::io::{Seek, Write};
use tracing::instrument;
use widestring::U16String;

use crate::bits::BitWriter;
use crate::error::{Error, Result};
use crate::huffman::{FrequencyMap, HuffmanTree};
use crate::types::{Gender, TlkEntry, TlkHeader, TlkStringTable};

/// Options for how the TLK file should be written
#[derive(Debug, Clone, Copy, Builder)]
pub struct TlkWriterOptions {
    /// Format version written to the header
    #[builder(default = 3)]
    pub version: u32,

    /// Minimum reader version written to the header
    #[builder(default = 2)]
    pub min_version: u32,
}

/// TLK file generator
///
/// Strings are collected per gender table first; nothing is written until
/// [`TlkWriter::finish`], because the shared huffman tree has to see every
/// string before any of them can be encoded.
///
/// ```
/// # fn doit() -> me_tlk::error::Result<()>
/// # {
/// use me_tlk::{Gender, TlkWriter, TlkWriterOptions};
/// use widestring::U16String;
///
/// let mut tlk = TlkWriter::new(
///     std::io::Cursor::new(Vec::new()),
///     TlkWriterOptions::builder().build(),
/// );
///
/// tlk.add(Gender::Male, 100, U16String::from_str("Hello"))?;
/// tlk.add(Gender::Female, 100, U16String::from_str("Hello"))?;
///
/// // Build the tree, encode every string and write the file.
/// let bytes = tlk.finish()?.into_inner();
/// # let _ = bytes;
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct TlkWriter<W: Write + Seek> {
    inner: W,
    options: TlkWriterOptions,
    male: IndexMap<u32, U16String>,
    female: IndexMap<u32, U16String>,
}

impl<W: Write + Seek> TlkWriter<W> {
    /// Initializes a writer around `inner`. No bytes are written until
    /// [`TlkWriter::finish`]
    pub fn new(inner: W, options: TlkWriterOptions) -> TlkWriter<W> {
        TlkWriter {
            inner,
            options,
            male: IndexMap::new(),
            female: IndexMap::new(),
        }
    }

    /// Initializes a writer pre-filled from a resolved string table, carrying
    /// its version fields into the header
    pub fn from_table(inner: W, table: &TlkStringTable) -> Result<TlkWriter<W>> {
        let options = TlkWriterOptions::builder()
            .version(table.version)
            .min_version(table.min_version)
            .build();

        let mut writer = Self::new(inner, options);
        for (id, text) in &table.male {
            writer.add(Gender::Male, *id, text.clone())?;
        }
        for (id, text) in &table.female {
            writer.add(Gender::Female, *id, text.clone())?;
        }

        Ok(writer)
    }

    /// Queues one string for the requested gender table. Entries keep their
    /// insertion order in the output file
    pub fn add(&mut self, gender: Gender, id: u32, text: impl Into<U16String>) -> Result<()> {
        let table = match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female,
        };

        if table.contains_key(&id) {
            return Err(Error::DuplicateId { id, gender });
        }

        table.insert(id, text.into());
        Ok(())
    }

    /// Builds the shared huffman tree from the union of all queued strings,
    /// encodes the male table then the female table, and writes the complete
    /// file. Input is validated before any bytes are emitted
    #[instrument(skip(self), err)]
    pub fn finish(self) -> Result<W> {
        if self.male.is_empty() && self.female.is_empty() {
            return Err(Error::NoStrings);
        }

        let mut freq = FrequencyMap::default();
        for text in self.male.values().chain(self.female.values()) {
            freq.push_str(text);
            // Terminator pair emitted after every string
            freq.push(0);
            freq.push(0);
        }

        let tree = HuffmanTree::from_frequencies(&freq)?;
        let codes = tree.code_table();

        let mut bits = BitWriter::new();

        let encode_table = |table: &IndexMap<u32, U16String>, bits: &mut BitWriter| {
            table
                .iter()
                .map(|(id, text)| TlkEntry {
                    id: *id,
                    bit_offset: codes.encode_string(bits, text) as u32,
                })
                .collect::<Vec<TlkEntry>>()
        };

        let male_entries = encode_table(&self.male, &mut bits);
        let female_entries = encode_table(&self.female, &mut bits);
        let data = bits.finish();

        let header = TlkHeader {
            version: self.options.version,
            min_version: self.options.min_version,
            male_entries: male_entries.len() as u32,
            female_entries: female_entries.len() as u32,
            tree_nodes: tree.len() as u32,
            data_length: data.len() as u32,
        };

        let mut inner = self.inner;
        header.write(&mut inner)?;

        for entry in male_entries.iter().chain(female_entries.iter()) {
            entry.write(&mut inner)?;
        }
        for node in tree.to_wire() {
            node.write(&mut inner)?;
        }

        inner.write_all(&data)?;

        Ok(inner)
    }
}
