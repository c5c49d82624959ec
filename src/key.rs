//! Text forms of the code table ("key") and the encoded payload as they are
//! exchanged between compression and decompression.
//!
//! The key is a flat JSON object, one entry per symbol:
//!
//! ```text
//! {"a":"0","b":"110","c":"100","d":"101","r":"111"}
//! ```

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::{Map, Value};

use crate::error::{HuffmanError, Result};
use crate::huffman::CodeTable;

/// Object entries in document order. Unlike `serde_json::Map`, repeated
/// keys are all kept so they can be reported.
struct KeyEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for KeyEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EntriesVisitor)
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = KeyEntries;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object of symbol to code")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<KeyEntries, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, Value>()? {
            entries.push(entry);
        }
        Ok(KeyEntries(entries))
    }
}

/// Serialises `table` with keys sorted, so equal tables give equal text.
pub fn table_to_json(table: &CodeTable) -> String {
    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_by_key(|(symbol, _)| **symbol);

    let map: Map<String, Value> = entries
        .into_iter()
        .map(|(symbol, code)| (symbol.to_string(), Value::String(code.clone())))
        .collect();
    Value::Object(map).to_string()
}

pub fn table_from_json(text: &str) -> Result<CodeTable> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(HuffmanError::InvalidKey(
            "expected a JSON object of symbol to code".to_string(),
        ));
    }
    let KeyEntries(entries) = serde_json::from_str(text)?;

    let mut table = CodeTable::with_capacity(entries.len());
    for (key, code) in entries {
        let mut chars = key.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(symbol), None) => symbol,
            _ => {
                return Err(HuffmanError::InvalidKey(format!(
                    "key {:?} is not a single symbol",
                    key
                )));
            }
        };
        let Value::String(code) = code else {
            return Err(HuffmanError::InvalidKey(format!(
                "code for {:?} is not a string",
                symbol
            )));
        };
        if code.is_empty() {
            return Err(HuffmanError::EmptyCode { symbol });
        }
        if let Some((position, digit)) = code
            .chars()
            .enumerate()
            .find(|(_, c)| *c != '0' && *c != '1')
        {
            return Err(HuffmanError::InvalidDigit { digit, position });
        }
        if table.insert(symbol, code).is_some() {
            return Err(HuffmanError::InvalidKey(format!(
                "symbol {:?} appears more than once",
                symbol
            )));
        }
    }
    Ok(table)
}

/// Strips the line terminator an editor may have appended to a payload file.
pub fn clean_payload(text: &str) -> &str {
    text.trim_end_matches(['\n', '\r'])
}
