//! Strand displacement: a branch migration step that removes the last
//! domain of a duplex, releasing the displaced strand together with
//! whatever it is still joined to.

use dsd_structure::Assembly;
use dsd_structure::Complex;
use dsd_structure::Gate;
use dsd_structure::Orientation;
use dsd_structure::Side;
use dsd_structure::Strand;

use crate::RateModel;
use crate::Reaction;
use crate::rules::Chain;
use crate::rules::Direction;
use crate::rules::Reactions;
use crate::rules::Step;
use crate::rules::UnaryRule;
use crate::rules::emit;
use crate::rules::settle;
use crate::rules::steps;

#[derive(Debug, Clone, Default)]
pub struct Displacement {
    rates: RateModel,
}

impl Displacement {
    pub fn new(rates: RateModel) -> Self {
        Displacement { rates }
    }
}

impl UnaryRule for Displacement {
    fn name(&self) -> &'static str {
        "displacement"
    }

    fn novel_reactions(&self, reactant: &Complex) -> Reactions {
        let Some(chain) = Chain::of(reactant) else {
            return Vec::new().into_iter();
        };
        steps(&chain)
            .into_iter()
            .filter(|step| step.losing_duplex(&chain) == 1)
            .map(|step| {
                let (remainder, released) = displace(&chain, &step);
                let rate = self.rates.migration_rate_of(&step.domain);
                emit(self.name(), Reaction::new(vec![reactant.clone()], vec![remainder, released], rate))
            })
            .collect::<Vec<_>>()
            .into_iter()
    }
}

/// Splits the chain into the part keeping the winning strand and the
/// released one.
fn displace(chain: &Chain, step: &Step) -> (Complex, Complex) {
    let (i, j) = (step.left, step.left + 1);
    let (gi, gj) = (&chain.gates[i], &chain.gates[j]);
    let x = step.domain.clone();
    let shared = step.invading.flip();
    let (own, other) = (step.invading.connector(), shared.connector());

    let mut remainder = Assembly::new();
    let mut released = Assembly::new();
    match step.direction {
        Direction::Forward => {
            let mut head = chain.gates[..=i].to_vec();
            match step.invading {
                Orientation::Upper => head[i].upper_right.remove(0),
                Orientation::Lower => head[i].lower_right.remove(0),
            };
            head[i].duplex.push(x);
            remainder.extend(other, &head, &chain.links[..i]);
            remainder.join(other, Strand::new(shared, gj.overhang(Side::Right, shared).clone()));
            released.join(own, incumbent(gj, step.invading));
            match chain.link(j, Side::Right) {
                Some(c) if c == other => chain.extend_tail(&mut remainder, c, j + 1),
                Some(c) => chain.extend_tail(&mut released, c, j + 1),
                None => (),
            }
        }
        Direction::Reverse => {
            match chain.link(i, Side::Left) {
                Some(c) if c == other => chain.extend_head(&mut remainder, c, i),
                Some(c) => chain.extend_head(&mut released, c, i),
                None => (),
            }
            released.join(own, incumbent(gi, step.invading));
            remainder.join(other, Strand::new(shared, gi.overhang(Side::Left, shared).clone()));
            let mut tail = chain.gates[j..].to_vec();
            match step.invading {
                Orientation::Upper => tail[0].upper_left.pop(),
                Orientation::Lower => tail[0].lower_left.pop(),
            };
            tail[0].duplex.insert(0, x);
            remainder.extend(other, &tail, &chain.links[j..]);
        }
    }
    (settle(remainder.build()), settle(released.build()))
}

/// The whole strand of a gate that loses its last duplex domain.
fn incumbent(gate: &Gate, orientation: Orientation) -> Strand {
    match orientation {
        Orientation::Upper => Strand::upper(gate.upper_strand()),
        Orientation::Lower => Strand::lower(gate.lower_strand()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::*;

    fn displaced(text: &str) -> Vec<Vec<String>> {
        outcomes(Displacement::default().novel_reactions(&complex(text)))
    }

    #[test]
    fn test_upper_forward() {
        assert_eq!(
            displaced("{L'}<L>[S1]<S R>:<L2>[S]<R2>{R'}"),
            expected(&[&["<L2 S R2>", "{L'}<L>[S1 S]<R>{R'}"]])
        );
        assert_eq!(displaced("[t^]<x y>:[x]::[y u^]"), expected(&[&["[t^ x]<y>", "<x>[y u^]"]]));
        assert_eq!(
            displaced("[t^]<x y>:<r>[x]{g}::[y u^]"),
            expected(&[&["[t^ x]<y>{g}", "<r x>[y u^]"]])
        );
        assert_eq!(
            displaced("[t^]<x y>:[x]:[y u^]"),
            expected(&[&["[t^ x]<y>:[y u^]", "<x>"]])
        );
    }

    #[test]
    fn test_upper_reverse() {
        assert_eq!(
            displaced("{L'}<L>[S1]<R>:<L2 S1>[S]<R2>{R'}"),
            expected(&[&["<L S1 R>", "{L'}<L2>[S1 S]<R2>{R'}"]])
        );
    }

    #[test]
    fn test_lower_strands() {
        assert_eq!(displaced("[a]{x* b}::[x]<c>{d}"), expected(&[&["[a x]<c>{b}", "{x* d}"]]));
        assert_eq!(displaced("[x]{b}::{c x*}[y]"), expected(&[&["{x* b}", "{c}[x y]"]]));
    }

    #[test]
    fn test_only_last_domain() {
        assert!(displaced("{L'}<L>[S1]<S R2>:<L1>[S S2]<R>{R'}").is_empty());
        assert!(displaced("<L N^ R>").is_empty());
    }
}
