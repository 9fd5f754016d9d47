//! Huffman coding over the shared TLK bit stream.
//!
//! The tree lives in a flat arena with the root at index 0. Children are a tagged
//! union packed into a signed integer on the wire: non-negative values index another
//! node, negative values store the bitwise complement of a literal UTF-16 code unit.
//! Every string ends with two consecutive null code units inside the stream.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use bitvec::{order::Lsb0, vec::BitVec};
use widestring::{U16Str, U16String};

use crate::bits::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::types::TlkNode;

/// One half of a huffman node
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HuffmanChild {
    /// Literal UTF-16 code unit
    Leaf(u16),
    /// Index of the child subtree's root within the node array
    Node(u32),
}

impl HuffmanChild {
    /// Decodes the signed wire form: negative values are leaf literals
    /// (`stored = -1 - code_unit`), non-negative values are node indices
    pub fn from_wire(value: i32) -> Self {
        if value < 0 {
            HuffmanChild::Leaf((-1 - value) as u16)
        } else {
            HuffmanChild::Node(value as u32)
        }
    }

    /// Encodes back into the signed wire form
    pub fn to_wire(self) -> i32 {
        match self {
            HuffmanChild::Leaf(unit) => -1 - unit as i32,
            HuffmanChild::Node(index) => index as i32,
        }
    }
}

/// An internal node of the huffman tree
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HuffmanNode {
    /// Child selected by a `0` bit
    pub left: HuffmanChild,
    /// Child selected by a `1` bit
    pub right: HuffmanChild,
}

/// Map of UTF-16 code unit frequencies to build a huffman tree from
#[derive(Default)]
pub struct FrequencyMap(HashMap<u16, u32>);

impl FrequencyMap {
    /// Updates the frequencies for every code unit of the provided string
    pub fn push_str(&mut self, value: &U16Str) {
        for unit in value.as_slice() {
            self.push(*unit);
        }
    }

    /// Updates the frequency for a single code unit
    #[inline]
    pub fn push(&mut self, unit: u16) {
        *self.0.entry(unit).or_insert(0) += 1;
    }
}

/// Pending subtree during the greedy merge
#[derive(Debug)]
enum BuildNode {
    Leaf(u16),
    Internal(Box<BuildNode>, Box<BuildNode>),
}

/// Heap entry ordering subtrees by ascending frequency, ties broken by
/// insertion sequence so the same input always yields the same tree
struct HeapItem {
    frequency: u32,
    sequence: u32,
    node: BuildNode,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.frequency == other.frequency && self.sequence == other.sequence
    }
}

impl Eq for HeapItem {}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.frequency
            .cmp(&other.frequency)
            .then(self.sequence.cmp(&other.sequence))
            .reverse()
    }
}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A huffman tree in its flat arena form, root at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
}

impl HuffmanTree {
    /// Creates a tree from the wire node records of a parsed file. Child
    /// indices are validated lazily during traversal so a bad subtree only
    /// fails the entries that reach it
    pub fn from_wire(records: &[TlkNode]) -> Self {
        let nodes = records
            .iter()
            .map(|record| HuffmanNode {
                left: HuffmanChild::from_wire(record.left),
                right: HuffmanChild::from_wire(record.right),
            })
            .collect();
        Self { nodes }
    }

    /// Flattens the tree back into wire node records
    pub fn to_wire(&self) -> Vec<TlkNode> {
        self.nodes
            .iter()
            .map(|node| TlkNode {
                left: node.left.to_wire(),
                right: node.right.to_wire(),
            })
            .collect()
    }

    /// Builds a tree from the provided frequency map using the standard greedy
    /// two-lowest-frequency merge. Symbols are seeded in ascending code unit
    /// order and ties broken by insertion sequence, so the result is
    /// deterministic. A single-symbol alphabet yields a one-node tree with
    /// both children pointing at the same leaf
    pub fn from_frequencies(freq: &FrequencyMap) -> Result<Self> {
        if freq.0.is_empty() {
            return Err(Error::NoStrings);
        }

        let mut symbols: Vec<(u16, u32)> = freq.0.iter().map(|(unit, count)| (*unit, *count)).collect();
        symbols.sort_unstable_by_key(|(unit, _)| *unit);

        let mut sequence = 0u32;
        let mut heap = BinaryHeap::with_capacity(symbols.len());
        for (unit, count) in symbols {
            heap.push(HeapItem {
                frequency: count,
                sequence,
                node: BuildNode::Leaf(unit),
            });
            sequence += 1;
        }

        while heap.len() > 1 {
            let left = heap.pop().expect("heap holds at least two subtrees");
            let right = heap.pop().expect("heap holds at least two subtrees");

            heap.push(HeapItem {
                frequency: left.frequency + right.frequency,
                sequence,
                node: BuildNode::Internal(Box::new(left.node), Box::new(right.node)),
            });
            sequence += 1;
        }

        let root = match heap.pop().expect("heap holds the merged root").node {
            // Degenerate single-symbol alphabet
            BuildNode::Leaf(unit) => {
                BuildNode::Internal(Box::new(BuildNode::Leaf(unit)), Box::new(BuildNode::Leaf(unit)))
            }
            internal => internal,
        };

        Ok(Self {
            nodes: Self::flatten(&root),
        })
    }

    /// Assigns arena indices to the internal nodes in breadth-first order,
    /// placing the root at index 0
    fn flatten(root: &BuildNode) -> Vec<HuffmanNode> {
        let mut nodes: Vec<HuffmanNode> = Vec::new();
        let mut queue: VecDeque<&BuildNode> = VecDeque::new();
        let mut next_index = 1u32;

        queue.push_back(root);

        while let Some(node) = queue.pop_front() {
            let BuildNode::Internal(left, right) = node else {
                unreachable!("only internal nodes are queued")
            };

            let left_child = match left.as_ref() {
                BuildNode::Leaf(unit) => HuffmanChild::Leaf(*unit),
                internal => {
                    let index = next_index;
                    next_index += 1;
                    queue.push_back(internal);
                    HuffmanChild::Node(index)
                }
            };

            let right_child = match right.as_ref() {
                BuildNode::Leaf(unit) => HuffmanChild::Leaf(*unit),
                internal => {
                    let index = next_index;
                    next_index += 1;
                    queue.push_back(internal);
                    HuffmanChild::Node(index)
                }
            };

            nodes.push(HuffmanNode {
                left: left_child,
                right: right_child,
            });
        }

        nodes
    }

    /// The flattened nodes, root first
    pub fn nodes(&self) -> &[HuffmanNode] {
        &self.nodes
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena contains no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Decodes one string starting at the reader's current bit position.
    ///
    /// Each bit selects the left (`0`) or right (`1`) half of the current
    /// node; a leaf emits one code unit and resets the walk to the root. The
    /// string ends once two consecutive null code units have been decoded;
    /// the terminator pair is not part of the returned text
    pub fn decode_string(&self, reader: &mut BitReader) -> Result<U16String> {
        if self.nodes.is_empty() {
            return Err(Error::MalformedTree { index: 0, count: 0 });
        }

        let mut units: Vec<u16> = Vec::new();
        let mut node = &self.nodes[0];
        let mut depth = 0usize;

        loop {
            let bit = reader.next_bit().ok_or(Error::MalformedStream)?;
            let child = if bit { node.right } else { node.left };

            match child {
                HuffmanChild::Leaf(unit) => {
                    units.push(unit);

                    if units.len() >= 2 && units[units.len() - 2..] == [0, 0] {
                        units.truncate(units.len() - 2);
                        break;
                    }

                    node = &self.nodes[0];
                    depth = 0;
                }
                HuffmanChild::Node(index) => {
                    node = self.nodes.get(index as usize).ok_or(Error::MalformedTree {
                        index,
                        count: self.nodes.len(),
                    })?;

                    // A descent longer than the arena must have revisited a node
                    depth += 1;
                    if depth > self.nodes.len() {
                        return Err(Error::MalformedStream);
                    }
                }
            }
        }

        Ok(U16String::from_vec(units))
    }

    /// Precomputes the `code unit -> bit path` table used by the encoder
    pub fn code_table(&self) -> CodeTable {
        let mut codes: HashMap<u16, BitVec<u8, Lsb0>> = HashMap::new();
        let mut visited = vec![false; self.nodes.len()];
        let mut stack: Vec<(u32, BitVec<u8, Lsb0>)> = Vec::new();

        if !self.nodes.is_empty() {
            stack.push((0, BitVec::new()));
        }

        while let Some((index, prefix)) = stack.pop() {
            let Some(node) = self.nodes.get(index as usize) else {
                continue;
            };
            if std::mem::replace(&mut visited[index as usize], true) {
                continue;
            }

            for (bit, child) in [(false, node.left), (true, node.right)] {
                let mut path = prefix.clone();
                path.push(bit);

                match child {
                    HuffmanChild::Leaf(unit) => {
                        codes.entry(unit).or_insert(path);
                    }
                    HuffmanChild::Node(next) => stack.push((next, path)),
                }
            }
        }

        CodeTable { codes }
    }
}

/// Mapping from code units to their huffman encoded bit paths
pub struct CodeTable {
    codes: HashMap<u16, BitVec<u8, Lsb0>>,
}

impl CodeTable {
    /// Writes the encoded bits of `text` followed by the two-null terminator,
    /// returning the bit offset at which the string began
    pub fn encode_string(&self, writer: &mut BitWriter, text: &U16Str) -> usize {
        let offset = writer.bit_len();

        for unit in text.as_slice().iter().copied().chain([0u16, 0u16]) {
            let code = self
                .codes
                .get(&unit)
                .expect("code table should cover every encoded symbol");
            for bit in code.iter().by_vals() {
                writer.write_bit(bit);
            }
        }

        offset
    }

    /// Number of distinct code units in this table
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table contains no code units
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
