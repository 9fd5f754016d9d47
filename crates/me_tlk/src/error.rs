//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

use crate::types::Gender;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// file does not start with the TLK magic number
    #[error("file does not start with the TLK magic number")]
    InvalidMagic,

    /// a section declared in the header extends past the end of the file
    #[error("file is truncated: a declared section extends past the end of the file")]
    TruncatedFile,

    /// bytes remain after the declared data section
    #[error("{0} unexpected bytes remain after the declared data section")]
    TrailingData(u64),

    /// a huffman node references a child index outside the node array
    #[error("huffman node references child index {index} outside the node array of {count}")]
    MalformedTree {
        /// The out of range child index
        index: u32,
        /// The number of nodes in the array
        count: usize,
    },

    /// the bit stream ended or cycled before a string terminator was found
    #[error("bit stream ended or cycled before a string terminator was found")]
    MalformedStream,

    /// unable to find the requested entry
    #[error("unable to find entry {id} in the {gender} table")]
    EntryNotFound {
        /// The requested string id
        id: u32,
        /// The table that was searched
        gender: Gender,
    },

    /// the same id was supplied twice for one table
    #[error("duplicate id {id} in the {gender} table")]
    DuplicateId {
        /// The repeated string id
        id: u32,
        /// The table the id was inserted into
        gender: Gender,
    },

    /// no strings were supplied, so no huffman tree can be built
    #[error("no strings were supplied, so no huffman tree can be built")]
    NoStrings,
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
