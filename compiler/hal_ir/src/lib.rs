//! HAL/S IR - shared front-end types
//!
//! This crate contains the data every Pass 1 stage agrees on:
//! - Typed indices for grammar symbols, automaton states, productions and sources
//! - Source locations and the source map that names them
//! - Token records, including macro-expansion provenance
//! - The grammar vocabulary and the standard HAL/S terminal set
//!
//! Symbol indices are assigned once when a vocabulary is built and stay
//! stable for the lifetime of every table derived from it.

mod id;
mod location;
mod token;
mod vocabulary;

pub mod hal;

pub use id::{ProductionId, SourceId, StateId, SymbolId};
pub use location::{Location, SourceKind, SourceMap};
pub use token::{ExpansionSite, Token};
pub use vocabulary::{TokenClass, Vocabulary, VocabularyBuilder, VocabularyError};
