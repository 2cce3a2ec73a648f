//! The reaction rule families.
//!
//! Every rule is a plain value holding a [`crate::RateModel`]. Unary rules rewrite
//! a single complex, binary rules combine two. Inputs are expected to be
//! canonical, and every product is canonicalized before it is handed out.

mod binding;
mod unbinding;
mod covering;
mod migration;
mod displacement;
mod leakage;

pub use binding::*;
pub use unbinding::*;
pub use covering::*;
pub use migration::*;
pub use displacement::*;
pub use leakage::*;

pub(crate) use migration::Direction;
pub(crate) use migration::Step;
pub(crate) use migration::steps;

use log::debug;

use dsd_structure::Assembly;
use dsd_structure::Complex;
use dsd_structure::Connector;
use dsd_structure::Gate;
use dsd_structure::Orientation;
use dsd_structure::Side;

use crate::Reaction;

/// The reactions found by one rule invocation.
pub type Reactions = std::vec::IntoIter<Reaction>;

pub trait UnaryRule {
    fn name(&self) -> &'static str;

    fn novel_reactions(&self, reactant: &Complex) -> Reactions;
}

pub trait BinaryRule {
    fn name(&self) -> &'static str;

    fn novel_reactions(&self, first: &Complex, second: &Complex) -> Reactions;
}

/// Canonical form of a rewrite result.
///
/// Rewrites only ever produce valid structures, a failure here is a bug
/// in the rule and aborts.
pub(crate) fn settle(raw: Complex) -> Complex {
    match raw.clone().canonicalize() {
        Ok(complex) => complex,
        Err(e) => panic!("rewrite produced invalid complex '{raw}': {e}"),
    }
}

pub(crate) fn emit(rule: &str, reaction: Reaction) -> Reaction {
    debug!("{rule}: {reaction}");
    reaction
}

/// A canonical gate complex taken apart for rewriting.
#[derive(Debug, Clone)]
pub(crate) struct Chain {
    pub(crate) gates: Vec<Gate>,
    pub(crate) links: Vec<Connector>,
}

impl Chain {
    /// `None` for free strands.
    pub(crate) fn of(complex: &Complex) -> Option<Chain> {
        if complex.is_strand() {
            return None;
        }
        Some(Chain {
            gates: complex.gates().into_iter().cloned().collect(),
            links: complex.connectors().to_vec(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.gates.len()
    }

    /// The connector on one side of gate `i`, if any.
    pub(crate) fn link(&self, i: usize, side: Side) -> Option<Connector> {
        match side {
            Side::Left => i.checked_sub(1).map(|j| self.links[j]),
            Side::Right => self.links.get(i).copied(),
        }
    }

    /// A strand of this orientation may end or be attached at this side of
    /// gate `i` without breaking the connector on that side.
    pub(crate) fn open_end(&self, i: usize, side: Side, orientation: Orientation) -> bool {
        self.link(i, side).is_none_or(|c| c == orientation.connector())
    }

    /// Appends gates `..end`.
    pub(crate) fn extend_head(&self, assembly: &mut Assembly, connector: Connector, end: usize) {
        if end > 0 {
            assembly.extend(connector, &self.gates[..end], &self.links[..end - 1]);
        }
    }

    /// Appends gates `start..`.
    pub(crate) fn extend_tail(&self, assembly: &mut Assembly, connector: Connector, start: usize) {
        if start < self.len() {
            assembly.extend(connector, &self.gates[start..], &self.links[start..]);
        }
    }

    /// This chain with the gates replaced, as a canonical complex.
    pub(crate) fn rebuild(&self, gates: &[Gate]) -> Complex {
        let mut assembly = Assembly::new();
        assembly.extend(Connector::Lower, gates, &self.links);
        settle(assembly.build())
    }
}
