#![warn(missing_debug_implementations)]

mod casing;
mod delins;
mod hunspell;
pub mod ngram;
mod word_graph;

pub use crate::casing::Casing;
pub use crate::hunspell::wordflags::WordFlags;
pub use crate::hunspell::{SpellChecker, Stats};
