//! The dsd_rules crate.
//!
//! Reaction rules for DNA strand displacement complexes written in the
//! notation of the `dsd_structure` crate:
//!  - Binding and Unbinding of toeholds
//!  - Covering of toeholds next to a duplex
//!  - Branch Migration and strand Displacement
//!  - Leakage (with and without a partial toehold)
//!
//! The [`Enumerator`] applies all of them to a population of complexes.
//!

/// Rules module, one rule family per file.
pub mod rules;

mod rates;
mod reactions;
mod enumeration;

pub use rates::*;
pub use reactions::*;
pub use enumeration::*;
