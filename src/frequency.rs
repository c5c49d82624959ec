use std::collections::HashMap;

use log::debug;

use crate::Symbol;

/// Occurrence counts of every distinct symbol in a text, remembering the
/// order in which symbols were first seen. That order is the tie-break used
/// when building the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<Symbol, u64>,
    order: Vec<Symbol>,
}

impl FrequencyTable {
    pub fn from_text(text: &str) -> Self {
        let mut counts = HashMap::new();
        let mut order = Vec::new();
        for symbol in text.chars() {
            let count = counts.entry(symbol).or_insert(0);
            if *count == 0 {
                order.push(symbol);
            }
            *count += 1;
        }
        let table = FrequencyTable { counts, order };
        debug!(
            "Counted {} symbols, {} distinct",
            table.total(),
            table.order.len()
        );
        table
    }

    pub fn get(&self, symbol: Symbol) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts, equal to the number of symbols in the source text.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(symbol, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.order.iter().map(|s| (*s, self.counts[s]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_abracadabra() {
        let freq = FrequencyTable::from_text("abracadabra");
        assert_eq!(freq.get('a'), Some(5));
        assert_eq!(freq.get('b'), Some(2));
        assert_eq!(freq.get('r'), Some(2));
        assert_eq!(freq.get('c'), Some(1));
        assert_eq!(freq.get('d'), Some(1));
        assert_eq!(freq.get('z'), None);
        assert_eq!(freq.total(), 11);
    }

    #[test]
    fn keeps_first_seen_order() {
        let freq = FrequencyTable::from_text("abracadabra");
        let order: Vec<Symbol> = freq.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec!['a', 'b', 'r', 'c', 'd']);
    }

    #[test]
    fn empty_text_gives_empty_table() {
        let freq = FrequencyTable::from_text("");
        assert!(freq.is_empty());
        assert_eq!(freq.total(), 0);
    }

    #[test]
    fn counts_scalar_values_not_bytes() {
        let freq = FrequencyTable::from_text("héé✓");
        assert_eq!(freq.len(), 3);
        assert_eq!(freq.get('é'), Some(2));
        assert_eq!(freq.total(), 4);
    }
}
