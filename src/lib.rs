//! Huffman coding for text.
//!
//! Compression derives a prefix-free code from symbol frequencies and emits
//! the payload as a string of `'0'`/`'1'` digits together with the flat code
//! table. Decompression needs only those two.
//!
//! ```
//! let compressed = huffman_text::compress("abracadabra")?;
//! let text = huffman_text::decompress(&compressed.payload, &compressed.table)?;
//! assert_eq!(text, "abracadabra");
//! # Ok::<(), huffman_text::HuffmanError>(())
//! ```

pub mod codec;
pub mod error;
pub mod files;
pub mod frequency;
pub mod huffman;
pub mod key;

use log::debug;

pub use codec::{decode_with_table, decode_with_tree, encode};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman::{
    CodeTable, CompressionStats, HuffmanTree, Node, build_code_table, build_huffman_tree,
};

/// One unit of text: a Unicode scalar value, as yielded by `str::chars`.
pub type Symbol = char;

#[derive(Debug, Clone)]
pub struct Compressed {
    pub payload: String,
    pub table: CodeTable,
    pub stats: CompressionStats,
}

pub fn compress(text: &str) -> Result<Compressed> {
    let freq = FrequencyTable::from_text(text);
    if freq.is_empty() {
        return Err(HuffmanError::EmptyInput);
    }

    let tree = build_huffman_tree(&freq)?;
    let table = build_code_table(&tree)?;
    let payload = encode(text, &table)?;
    let stats = CompressionStats::new(&freq, &table);
    debug!(
        "Compressed {} symbols into {} digits",
        stats.symbols, stats.payload_digits
    );

    Ok(Compressed {
        payload,
        table,
        stats,
    })
}

pub fn decompress(payload: &str, table: &CodeTable) -> Result<String> {
    decode_with_table(payload, table)
}
