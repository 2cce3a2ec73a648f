//! Branch migration between neighbouring gates.
//!
//! Two gates joined by `:` share their lower strand, so the upper strands
//! compete for it; across `::` the lower strands compete for the shared
//! upper strand. The boundary between the two duplexes moves by one domain
//! in either direction, as long as the strand between them is clear.

use dsd_structure::Complex;
use dsd_structure::Connector;
use dsd_structure::Domain;
use dsd_structure::Gate;
use dsd_structure::Orientation;

use crate::RateModel;
use crate::Reaction;
use crate::rules::Chain;
use crate::rules::Reactions;
use crate::rules::UnaryRule;
use crate::rules::emit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// The left duplex grows.
    Forward,
    /// The right duplex grows.
    Reverse,
}

/// A possible one-domain shift of the boundary between gates `left` and
/// `left + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) left: usize,
    /// The strands competing for the shared one.
    pub(crate) invading: Orientation,
    pub(crate) direction: Direction,
    /// The moving domain, in duplex (upper) form.
    pub(crate) domain: Domain,
}

impl Step {
    /// Length of the duplex that loses the domain.
    pub(crate) fn losing_duplex(&self, chain: &Chain) -> usize {
        match self.direction {
            Direction::Forward => chain.gates[self.left + 1].duplex.len(),
            Direction::Reverse => chain.gates[self.left].duplex.len(),
        }
    }
}

/// Every boundary shift permitted by the junctions of a chain.
pub(crate) fn steps(chain: &Chain) -> Vec<Step> {
    let mut found = Vec::new();
    for (left, link) in chain.links.iter().enumerate() {
        let (gi, gj) = (&chain.gates[left], &chain.gates[left + 1]);
        let (Some(first), Some(last)) = (gj.duplex.first(), gi.duplex.last()) else {
            continue;
        };
        let step = |invading, direction, domain: &Domain| Step {
            left,
            invading,
            direction,
            domain: domain.clone(),
        };
        match link {
            Connector::Lower => {
                if !gi.lower_right.is_empty() || !gj.lower_left.is_empty() {
                    continue;
                }
                if gi.upper_right.first() == Some(first) {
                    found.push(step(Orientation::Upper, Direction::Forward, first));
                }
                if gj.upper_left.last() == Some(last) {
                    found.push(step(Orientation::Upper, Direction::Reverse, last));
                }
            }
            Connector::Upper => {
                if !gi.upper_right.is_empty() || !gj.upper_left.is_empty() {
                    continue;
                }
                if gi.lower_right.first() == Some(&first.complement()) {
                    found.push(step(Orientation::Lower, Direction::Forward, first));
                }
                if gj.lower_left.last() == Some(&last.complement()) {
                    found.push(step(Orientation::Lower, Direction::Reverse, last));
                }
            }
        }
    }
    found
}

/// The gates after shifting the boundary. The losing duplex must keep at
/// least one domain.
pub(crate) fn shift(chain: &Chain, step: &Step) -> Vec<Gate> {
    let mut gates = chain.gates.clone();
    let (head, tail) = gates.split_at_mut(step.left + 1);
    let (gi, gj) = (&mut head[step.left], &mut tail[0]);
    let x = step.domain.clone();
    match (step.invading, step.direction) {
        (Orientation::Upper, Direction::Forward) => {
            gi.upper_right.remove(0);
            gj.duplex.remove(0);
            gi.duplex.push(x.clone());
            gj.upper_left.push(x);
        }
        (Orientation::Upper, Direction::Reverse) => {
            gj.upper_left.pop();
            gi.duplex.pop();
            gi.upper_right.insert(0, x.clone());
            gj.duplex.insert(0, x);
        }
        (Orientation::Lower, Direction::Forward) => {
            gi.lower_right.remove(0);
            gj.duplex.remove(0);
            gi.duplex.push(x.clone());
            gj.lower_left.push(x.complement());
        }
        (Orientation::Lower, Direction::Reverse) => {
            gj.lower_left.pop();
            gi.duplex.pop();
            gi.lower_right.insert(0, x.complement());
            gj.duplex.insert(0, x);
        }
    }
    gates
}

#[derive(Debug, Clone, Default)]
pub struct Migration {
    rates: RateModel,
}

impl Migration {
    pub fn new(rates: RateModel) -> Self {
        Migration { rates }
    }
}

impl UnaryRule for Migration {
    fn name(&self) -> &'static str {
        "migration"
    }

    fn novel_reactions(&self, reactant: &Complex) -> Reactions {
        let Some(chain) = Chain::of(reactant) else {
            return Vec::new().into_iter();
        };
        steps(&chain)
            .into_iter()
            .filter(|step| step.losing_duplex(&chain) >= 2)
            .map(|step| {
                let product = chain.rebuild(&shift(&chain, &step));
                let rate = self.rates.migration_rate_of(&step.domain);
                emit(self.name(), Reaction::new(vec![reactant.clone()], vec![product], rate))
            })
            .collect::<Vec<_>>()
            .into_iter()
    }
}
