//! Label tags keep the labels of every macro expansion unique.
//!
//! Each macro kind has its own counter. Two expansions of the same kind
//! never receive the same tag, so their labels never collide.
use std::collections::HashMap;

/// The kinds of generated code that need branch labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MacroKind {
    Multiply,
    Divide,
    GreaterEqual,
    Greater,
    Equal,
    NotEqual,
    ShiftLeft,
    ShiftRight,
    If,
    While,
}

/// Issues label tags.
pub trait TagSource {
    /// Returns a tag that has not been returned before for the kind.
    fn next_tag(&mut self, kind: MacroKind) -> usize;
}

/// One counter per macro kind, each starting at zero.
#[derive(Debug, Default)]
pub struct LabelCounters {
    counters: HashMap<MacroKind, usize>,
}

impl LabelCounters {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TagSource for LabelCounters {
    fn next_tag(&mut self, kind: MacroKind) -> usize {
        let counter = self.counters.entry(kind).or_insert(0);
        let tag = *counter;
        *counter += 1;
        tag
    }
}
