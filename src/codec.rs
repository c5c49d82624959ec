use std::collections::HashMap;

use log::debug;

use crate::error::{HuffmanError, Result};
use crate::huffman::{CodeTable, Node};
use crate::Symbol;

/// Concatenates the code of every symbol of `text`, in order.
pub fn encode(text: &str, table: &CodeTable) -> Result<String> {
    let mut payload = String::with_capacity(text.len() * 4);

    for (position, symbol) in text.chars().enumerate() {
        match table.get(&symbol) {
            Some(code) => payload.push_str(code),
            None => return Err(HuffmanError::UnknownSymbol { symbol, position }),
        }
    }

    debug!(
        "Encoded {} symbols into {} digits",
        text.chars().count(),
        payload.len()
    );
    Ok(payload)
}

/// Code to symbol lookup built from a [`CodeTable`].
#[derive(Debug, Clone)]
pub struct ReverseTable {
    codes: HashMap<String, Symbol>,
    max_len: usize,
}

impl ReverseTable {
    pub fn new(table: &CodeTable) -> Result<Self> {
        let mut codes: HashMap<String, Symbol> = HashMap::with_capacity(table.len());
        let mut max_len = 0;

        for (&symbol, code) in table {
            if code.is_empty() {
                return Err(HuffmanError::EmptyCode { symbol });
            }
            if let Some((position, digit)) = code.chars().enumerate().find(|(_, c)| !is_digit(*c)) {
                return Err(HuffmanError::InvalidDigit { digit, position });
            }
            if let Some(&first) = codes.get(code) {
                return Err(HuffmanError::DuplicateCode {
                    code: code.clone(),
                    first,
                    second: symbol,
                });
            }
            max_len = max_len.max(code.len());
            codes.insert(code.clone(), symbol);
        }

        // Any code prefixing another sorts directly before some code it prefixes.
        let mut sorted: Vec<(&String, &Symbol)> = codes.iter().collect();
        sorted.sort();
        for pair in sorted.windows(2) {
            let ((shorter_code, &shorter), (longer_code, &longer)) = (pair[0], pair[1]);
            if longer_code.starts_with(shorter_code.as_str()) {
                return Err(HuffmanError::AmbiguousCode { shorter, longer });
            }
        }

        debug!(
            "Reverse lookup table created. Entries: {}, longest code: {}",
            codes.len(),
            max_len
        );
        Ok(ReverseTable { codes, max_len })
    }

    pub fn get(&self, code: &str) -> Option<Symbol> {
        self.codes.get(code).copied()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

/// Greedy left-to-right decode against the flat code table. This is the
/// decoder used across the compress/decompress boundary.
pub fn decode_with_table(payload: &str, table: &CodeTable) -> Result<String> {
    let reverse = ReverseTable::new(table)?;
    let mut result = String::new();
    let mut current_code = String::with_capacity(reverse.max_len());

    for (position, digit) in payload.chars().enumerate() {
        if !is_digit(digit) {
            return Err(HuffmanError::InvalidDigit { digit, position });
        }
        current_code.push(digit);
        if let Some(symbol) = reverse.get(&current_code) {
            result.push(symbol);
            current_code.clear();
        } else if current_code.len() >= reverse.max_len() {
            return Err(HuffmanError::RunawayBuffer {
                position,
                max_len: reverse.max_len(),
            });
        }
    }

    if !current_code.is_empty() {
        return Err(HuffmanError::IncompleteCode {
            buffer: current_code,
        });
    }

    debug!(
        "Decoded {} digits into {} symbols",
        payload.len(),
        result.chars().count()
    );
    Ok(result)
}

/// Walks `root` for each digit, emitting a symbol on every leaf reached.
/// Needs the tree the codes came from, so it only applies when the caller
/// kept it.
pub fn decode_with_tree(payload: &str, root: &Node) -> Result<String> {
    let mut result = String::new();
    let mut current = root;
    let mut walked = String::new();

    for (position, digit) in payload.chars().enumerate() {
        if !is_digit(digit) {
            return Err(HuffmanError::InvalidDigit { digit, position });
        }

        current = match current {
            // A lone leaf root is coded with a single '0' per symbol.
            Node::Leaf { symbol, .. } if digit == '0' => {
                result.push(*symbol);
                continue;
            }
            Node::Leaf { .. } => return Err(HuffmanError::InvalidDigit { digit, position }),
            Node::Internal { left, right, .. } => {
                if digit == '0' {
                    left.as_ref()
                } else {
                    right.as_ref()
                }
            }
        };
        walked.push(digit);

        if let Node::Leaf { symbol, .. } = current {
            result.push(*symbol);
            current = root;
            walked.clear();
        }
    }

    if !walked.is_empty() {
        return Err(HuffmanError::IncompleteCode { buffer: walked });
    }
    Ok(result)
}

fn is_digit(c: char) -> bool {
    c == '0' || c == '1'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::huffman::{build_code_table, build_huffman_tree};

    fn table(pairs: &[(Symbol, &str)]) -> CodeTable {
        pairs.iter().map(|(s, c)| (*s, c.to_string())).collect()
    }

    fn tree_and_table(text: &str) -> (Node, CodeTable) {
        let tree = build_huffman_tree(&FrequencyTable::from_text(text)).unwrap();
        let table = build_code_table(&tree).unwrap();
        (tree, table)
    }

    #[test]
    fn encodes_in_text_order() {
        let codes = table(&[('a', "0"), ('b', "10"), ('c', "11")]);
        assert_eq!(encode("abca", &codes).unwrap(), "010110");
        assert_eq!(encode("", &codes).unwrap(), "");
    }

    #[test]
    fn encode_reports_unknown_symbol() {
        let codes = table(&[('a', "0"), ('b', "1")]);
        let err = encode("abz", &codes).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::UnknownSymbol {
                symbol: 'z',
                position: 2
            }
        ));
    }

    #[test]
    fn single_symbol_round_trip() {
        let (tree, codes) = tree_and_table("aaaa");
        let payload = encode("aaaa", &codes).unwrap();
        assert_eq!(payload, "0000");
        assert_eq!(decode_with_table(&payload, &codes).unwrap(), "aaaa");
        assert_eq!(decode_with_tree(&payload, &tree).unwrap(), "aaaa");
    }

    #[test]
    fn strategies_agree() {
        let text = "she sells sea shells by the sea shore";
        let (tree, codes) = tree_and_table(text);
        let payload = encode(text, &codes).unwrap();
        assert_eq!(decode_with_table(&payload, &codes).unwrap(), text);
        assert_eq!(decode_with_tree(&payload, &tree).unwrap(), text);
    }

    #[test]
    fn duplicate_code_is_rejected() {
        let codes = table(&[('a', "01"), ('b', "01")]);
        let err = decode_with_table("01", &codes).unwrap_err();
        assert!(matches!(err, HuffmanError::DuplicateCode { .. }));
    }

    #[test]
    fn prefix_conflict_is_rejected() {
        let codes = table(&[('a', "1"), ('b', "0"), ('c', "01")]);
        let err = decode_with_table("01", &codes).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::AmbiguousCode {
                shorter: 'b',
                longer: 'c'
            }
        ));
    }

    #[test]
    fn empty_code_is_rejected() {
        let codes = table(&[('a', ""), ('b', "1")]);
        let err = decode_with_table("1", &codes).unwrap_err();
        assert!(matches!(err, HuffmanError::EmptyCode { symbol: 'a' }));
    }

    #[test]
    fn trailing_digits_are_incomplete() {
        let codes = table(&[('a', "0"), ('b', "10"), ('c', "11")]);
        let err = decode_with_table("0101", &codes).unwrap_err();
        match err {
            HuffmanError::IncompleteCode { buffer } => assert_eq!(buffer, "1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unmatched_buffer_runs_away() {
        // "00" is never completed by a code of length <= 2
        let codes = table(&[('a', "1"), ('b', "01")]);
        let err = decode_with_table("1001", &codes).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::RunawayBuffer {
                position: 2,
                max_len: 2
            }
        ));
    }

    #[test]
    fn foreign_payload_characters_are_rejected() {
        let codes = table(&[('a', "0"), ('b', "1")]);
        let err = decode_with_table("01x", &codes).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::InvalidDigit {
                digit: 'x',
                position: 2
            }
        ));
    }

    #[test]
    fn tree_decode_detects_truncation() {
        let (tree, codes) = tree_and_table("abracadabra");
        let mut payload = encode("abracadabra", &codes).unwrap();
        payload.pop();
        let err = decode_with_tree(&payload, &tree).unwrap_err();
        assert!(matches!(err, HuffmanError::IncompleteCode { .. }));
    }

    #[test]
    fn leaf_root_rejects_one_digit() {
        let (tree, _) = tree_and_table("zz");
        let err = decode_with_tree("01", &tree).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::InvalidDigit {
                digit: '1',
                position: 1
            }
        ));
    }
}
