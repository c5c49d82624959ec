use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use log::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::Symbol;

/// Symbol to its code, a non-empty string of `'0'`/`'1'` digits.
pub type CodeTable = HashMap<Symbol, String>;

/// Code given to the only symbol of a single-symbol text, where the path
/// from root to leaf would otherwise be empty.
pub const SINGLE_SYMBOL_CODE: &str = "0";

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            freq: left.freq() + right.freq(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Sum of the frequencies stored in the leaves below this node.
    pub fn leaf_freq_sum(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { left, right, .. } => left.leaf_freq_sum() + right.leaf_freq_sum(),
        }
    }
}

pub type HuffmanTree = Node;

/// Heap entry ordered by `(freq, seq)` smallest first. `seq` is the first-seen
/// index for leaves and a running counter for merged nodes, so equal
/// frequencies pop oldest first.
struct HeapNode {
    freq: u64,
    seq: usize,
    node: Node,
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl Eq for HeapNode {}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for Min-Heap behavior in BinaryHeap (which is max-heap by default)
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn build_huffman_tree(frequencies: &FrequencyTable) -> Result<HuffmanTree> {
    debug!(
        "Building Huffman tree from {} unique symbols",
        frequencies.len()
    );

    let mut heap: BinaryHeap<HeapNode> = frequencies
        .iter()
        .enumerate()
        .map(|(seq, (symbol, freq))| HeapNode {
            freq,
            seq,
            node: Node::Leaf { symbol, freq },
        })
        .collect();
    let mut next_seq = heap.len();

    loop {
        let Some(left) = heap.pop() else {
            return Err(HuffmanError::EmptyFrequencyTable);
        };
        let Some(right) = heap.pop() else {
            debug!("Tree construction complete, root frequency {}", left.freq);
            return Ok(left.node);
        };

        let node = Node::merge(left.node, right.node);
        trace!("Merged {} + {} -> {}", left.freq, right.freq, node.freq());
        heap.push(HeapNode {
            freq: node.freq(),
            seq: next_seq,
            node,
        });
        next_seq += 1;
    }
}

/// Walks the tree assigning `0` for left and `1` for right. A lone leaf root
/// gets [`SINGLE_SYMBOL_CODE`].
pub fn build_code_table(root: &Node) -> Result<CodeTable> {
    let mut table = CodeTable::new();
    if let Node::Leaf { symbol, .. } = root {
        trace!("Single symbol {:?} gets code '{}'", symbol, SINGLE_SYMBOL_CODE);
        table.insert(*symbol, SINGLE_SYMBOL_CODE.to_string());
        return Ok(table);
    }

    let mut seen = HashSet::new();
    assign_codes(root, String::new(), &mut table, &mut seen)?;
    debug!("Code table built with {} entries", table.len());
    Ok(table)
}

fn assign_codes(
    node: &Node,
    prefix: String,
    table: &mut CodeTable,
    seen: &mut HashSet<Symbol>,
) -> Result<()> {
    match node {
        Node::Leaf { symbol, .. } => {
            if !seen.insert(*symbol) {
                return Err(HuffmanError::MalformedTree(format!(
                    "symbol {:?} appears in more than one leaf",
                    symbol
                )));
            }
            trace!("Assigning code to {:?}: '{}'", symbol, prefix);
            table.insert(*symbol, prefix);
        }
        Node::Internal { freq, left, right } => {
            if *freq != left.freq() + right.freq() {
                return Err(HuffmanError::MalformedTree(format!(
                    "internal node at '{}' has frequency {} but its children sum to {}",
                    prefix,
                    freq,
                    left.freq() + right.freq()
                )));
            }
            assign_codes(left, format!("{}0", prefix), table, seen)?;
            assign_codes(right, format!("{}1", prefix), table, seen)?;
        }
    }
    Ok(())
}

/// Shannon entropy of the distribution, in bits per symbol.
pub fn entropy_from_freq(freq: &FrequencyTable) -> f64 {
    let total_f = freq.total() as f64;
    if total_f == 0.0 {
        return 0.0;
    }

    let entropy: f64 = freq
        .iter()
        .map(|(_, count)| {
            let p = count as f64 / total_f;
            -p * p.log2()
        })
        .sum();

    debug!(
        "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
        entropy,
        freq.total()
    );
    entropy
}

/// Number of digits the encoded payload will hold for text with these frequencies.
pub fn payload_digits(freq: &FrequencyTable, table: &CodeTable) -> u64 {
    freq.iter()
        .map(|(symbol, count)| count * table.get(&symbol).map_or(0, |c| c.len() as u64))
        .sum()
}

/// Expected code digits per symbol under the given frequencies.
pub fn average_code_length(freq: &FrequencyTable, table: &CodeTable) -> f64 {
    let total = freq.total();
    if total == 0 {
        return 0.0;
    }
    payload_digits(freq, table) as f64 / total as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    pub symbols: u64,
    pub distinct_symbols: usize,
    pub payload_digits: u64,
    pub entropy: f64,
    pub average_code_length: f64,
}

impl CompressionStats {
    pub fn new(freq: &FrequencyTable, table: &CodeTable) -> Self {
        CompressionStats {
            symbols: freq.total(),
            distinct_symbols: freq.len(),
            payload_digits: payload_digits(freq, table),
            entropy: entropy_from_freq(freq),
            average_code_length: average_code_length(freq, table),
        }
    }

    /// Payload digits relative to storing every symbol in 8 bits, as a percentage saved.
    pub fn ratio(&self) -> f64 {
        if self.symbols == 0 {
            return 0.0;
        }
        100.0 * (1.0 - self.payload_digits as f64 / (self.symbols * 8) as f64)
    }
}
