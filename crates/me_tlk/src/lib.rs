//! This library handles reading from and creating **TLK** talk table files used by *Mass Effect*.
//!
//! # TLK Format Documentation
//!
//! This crate provides utilities to read and create files in the **TLK** format, the binary
//! localization table used by the *Mass Effect* trilogy. A TLK file stores every localized
//! string of one language, split into a male and a female variant table, with all text
//! compressed into a single shared Huffman bit stream. TLK files are typically identified
//! with the `.tlk` extension.
//!
//! ## File Structure
//!
//! A TLK file consists of a header, two entry tables, a flattened Huffman tree, and the
//! compressed data section.
//!
//! | Offset (bytes) | Size | Field                  | Description                                   |
//! |----------------|------|------------------------|-----------------------------------------------|
//! | 0x0000         | 4    | Magic number           | 0x006B6C54 ("Tlk\0")                          |
//! | 0x0004         | 4    | Version                | Format version of this file                   |
//! | 0x0008         | 4    | Min Version            | Oldest reader version able to parse this file |
//! | 0x000C         | 4    | Male Entry Count       | Number of entries in the male table (M)       |
//! | 0x0010         | 4    | Female Entry Count     | Number of entries in the female table (F)     |
//! | 0x0014         | 4    | Tree Node Count        | Number of Huffman tree nodes (N)              |
//! | 0x0018         | 4    | Data Length            | Size in bytes of the data section (D)         |
//! | 0x001C         | 8×M  | Male entries           | `{u32 id, u32 bit_offset}` records            |
//! | ...            | 8×F  | Female entries         | `{u32 id, u32 bit_offset}` records            |
//! | ...            | 8×N  | Huffman nodes          | `{i32 left, i32 right}` records               |
//! | ...            | D    | Data                   | Huffman encoded bit stream                    |
//!
//! The total file length must equal `28 + 8M + 8F + 8N + D` exactly.
//!
//! ### Entry Tables
//!
//! Each entry is a pair of a string id and the zero based bit position within the data
//! section where that string's encoded bits begin. Ids must be unique within a table but
//! the tables are stored in file order, not necessarily sorted. The male and female tables
//! are independent: the same id may appear in both, pointing at different (or shared) bit
//! offsets.
//!
//! ### Huffman Nodes
//!
//! The tree is stored as a flat array of `(i32 left, i32 right)` pairs with the root at
//! index 0. A non-negative child value is the index of another node in the array; a
//! negative child value is a literal leaf storing the bitwise complement of a UTF-16 code
//! unit (`stored = -1 - code_unit`).
//!
//! ### Data Section
//!
//! A continuous bit stream, least significant bit first within each byte, padded with zero
//! bits to the next byte boundary. Decoding starts at an entry's bit offset, walking the
//! tree from the root: a `0` bit selects the left child, a `1` bit the right child. Each
//! leaf emits one UTF-16 code unit and resets the walk to the root. A string ends with two
//! consecutive null code units, which are not part of its text.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.tlk`
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod bits;
pub mod error;
pub mod huffman;
pub mod read;
#[cfg(feature = "serde")]
mod serde;
pub mod types;
pub mod write;

pub use read::TlkDocument;
pub use types::{Gender, TlkStringTable};
pub use write::{TlkWriter, TlkWriterOptions};
