//! Leak reactions: a free strand invades a duplex without a toehold.
//!
//! [`StrandLeakage`] needs the invader to contain the complete duplex.
//! [`ToeholdLeakage`] covers duplexes with a toehold at one end: the
//! invader takes over the rest and the toehold is left single-stranded on
//! the strand that stays.

use itertools::Itertools;

use dsd_structure::Complex;
use dsd_structure::Domain;
use dsd_structure::Gate;
use dsd_structure::Orientation;
use dsd_structure::Side;
use dsd_structure::Strand;
use dsd_structure::complement_all;

use crate::RateModel;
use crate::Reaction;
use crate::rules::BinaryRule;
use crate::rules::Chain;
use crate::rules::Reactions;
use crate::rules::emit;

/// The free strand and the gate complex of a reactant pair, in either order.
fn invader_and_target<'a>(first: &'a Complex, second: &'a Complex) -> Option<(&'a Strand, Chain)> {
    match (first.as_strand(), second.as_strand()) {
        (Some(s), None) => Some((s, Chain::of(second)?)),
        (None, Some(s)) => Some((s, Chain::of(first)?)),
        _ => None,
    }
}

/// The strand of this orientation in gate `i` is not joined to any other
/// gate, so it can be released.
fn releasable(chain: &Chain, i: usize, orientation: Orientation) -> bool {
    let joined = orientation.connector();
    chain.link(i, Side::Left) != Some(joined) && chain.link(i, Side::Right) != Some(joined)
}

fn occurrences(haystack: &[Domain], needle: &[Domain]) -> Vec<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }
    haystack.windows(needle.len()).positions(|w| w == needle).collect()
}

fn incumbent(gate: &Gate, orientation: Orientation) -> Complex {
    Complex::from_strand(match orientation {
        Orientation::Upper => Strand::upper(gate.upper_strand()),
        Orientation::Lower => Strand::lower(gate.lower_strand()),
    })
}

/// Collects (new gate index, new gate, released strand) triples into
/// reactions.
fn reactions(
    rule: &str,
    first: &Complex,
    second: &Complex,
    chain: &Chain,
    found: Vec<(usize, Gate, Complex)>,
    rate: f64,
) -> Reactions {
    found
        .into_iter()
        .map(|(i, gate, released)| {
            let mut gates = chain.gates.clone();
            gates[i] = gate;
            let products = vec![chain.rebuild(&gates), released];
            emit(rule, Reaction::new(vec![first.clone(), second.clone()], products, rate))
        })
        .collect::<Vec<_>>()
        .into_iter()
}

#[derive(Debug, Clone, Default)]
pub struct StrandLeakage {
    rates: RateModel,
}

impl StrandLeakage {
    pub fn new(rates: RateModel) -> Self {
        StrandLeakage { rates }
    }
}

impl BinaryRule for StrandLeakage {
    fn name(&self) -> &'static str {
        "strand-leakage"
    }

    fn novel_reactions(&self, first: &Complex, second: &Complex) -> Reactions {
        let Some((strand, chain)) = invader_and_target(first, second) else {
            return Vec::new().into_iter();
        };
        let upper = strand.as_upper();
        let lower = strand.as_lower();

        let mut found = Vec::new();
        for (i, gate) in chain.gates.iter().enumerate() {
            if gate.has_toehold_duplex() {
                continue;
            }
            if releasable(&chain, i, Orientation::Upper) {
                let inv = upper.domains();
                for s in occurrences(inv, &gate.duplex) {
                    let e = s + gate.duplex.len();
                    let new = Gate {
                        upper_left: inv[..s].to_vec(),
                        upper_right: inv[e..].to_vec(),
                        ..gate.clone()
                    };
                    found.push((i, new, incumbent(gate, Orientation::Upper)));
                }
            }
            if releasable(&chain, i, Orientation::Lower) {
                let inv = lower.domains();
                for s in occurrences(inv, &complement_all(&gate.duplex)) {
                    let e = s + gate.duplex.len();
                    let new = Gate {
                        lower_left: inv[..s].to_vec(),
                        lower_right: inv[e..].to_vec(),
                        ..gate.clone()
                    };
                    found.push((i, new, incumbent(gate, Orientation::Lower)));
                }
            }
        }
        reactions(self.name(), first, second, &chain, found, self.rates.leak_rate)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToeholdLeakage {
    rates: RateModel,
}

impl ToeholdLeakage {
    pub fn new(rates: RateModel) -> Self {
        ToeholdLeakage { rates }
    }
}

impl BinaryRule for ToeholdLeakage {
    fn name(&self) -> &'static str {
        "toehold-leakage"
    }

    fn novel_reactions(&self, first: &Complex, second: &Complex) -> Reactions {
        let Some((strand, chain)) = invader_and_target(first, second) else {
            return Vec::new().into_iter();
        };
        let upper = strand.as_upper();
        let lower = strand.as_lower();

        let mut found = Vec::new();
        for (i, gate) in chain.gates.iter().enumerate() {
            let n = gate.duplex.len();
            if n < 2 {
                continue;
            }
            // (toehold, remaining duplex, toehold sits at the start)
            let mut variants = Vec::new();
            if gate.duplex[0].is_toehold() {
                variants.push((&gate.duplex[0], &gate.duplex[1..], true));
            }
            if gate.duplex[n - 1].is_toehold() {
                variants.push((&gate.duplex[n - 1], &gate.duplex[..n - 1], false));
            }

            for (t, rest, at_start) in variants {
                if releasable(&chain, i, Orientation::Upper) {
                    let inv = upper.domains();
                    for s in occurrences(inv, rest) {
                        let e = s + rest.len();
                        if (at_start && s > 0 && inv[s - 1] == *t) || (!at_start && inv.get(e) == Some(t)) {
                            continue;
                        }
                        let mut new = Gate {
                            upper_left: inv[..s].to_vec(),
                            duplex: rest.to_vec(),
                            upper_right: inv[e..].to_vec(),
                            ..gate.clone()
                        };
                        if at_start {
                            new.lower_left.push(t.complement());
                        } else {
                            new.lower_right.insert(0, t.complement());
                        }
                        found.push((i, new, incumbent(gate, Orientation::Upper)));
                    }
                }
                if releasable(&chain, i, Orientation::Lower) {
                    let inv = lower.domains();
                    let tc = t.complement();
                    for s in occurrences(inv, &complement_all(rest)) {
                        let e = s + rest.len();
                        if (at_start && s > 0 && inv[s - 1] == tc) || (!at_start && inv.get(e) == Some(&tc)) {
                            continue;
                        }
                        let mut new = Gate {
                            lower_left: inv[..s].to_vec(),
                            duplex: rest.to_vec(),
                            lower_right: inv[e..].to_vec(),
                            ..gate.clone()
                        };
                        if at_start {
                            new.upper_left.push(t.clone());
                        } else {
                            new.upper_right.insert(0, t.clone());
                        }
                        found.push((i, new, incumbent(gate, Orientation::Lower)));
                    }
                }
            }
        }
        reactions(self.name(), first, second, &chain, found, self.rates.leak_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::*;

    fn strand_leak(a: &str, b: &str) -> Vec<Vec<String>> {
        outcomes(StrandLeakage::default().novel_reactions(&complex(a), &complex(b)))
    }

    fn toehold_leak(a: &str, b: &str) -> Vec<Vec<String>> {
        outcomes(ToeholdLeakage::default().novel_reactions(&complex(a), &complex(b)))
    }

    #[test]
    fn test_strand_leak_upper() {
        assert_eq!(
            strand_leak("<L1 S R1>", "{L'}<L>[S]<R>{R'}"),
            expected(&[&["<L S R>", "{L'}<L1>[S]<R1>{R'}"]])
        );
        assert_eq!(
            strand_leak("{L'}<L>[S]<R>{R'}", "<L1 S R1>"),
            expected(&[&["<L S R>", "{L'}<L1>[S]<R1>{R'}"]])
        );
        assert!(strand_leak("<L1 S R1>", "<L S R>").is_empty());
        assert!(strand_leak("<t^>", "[t^]").is_empty());
    }

    #[test]
    fn test_strand_leak_lower() {
        assert_eq!(
            strand_leak("{A S* B}", "{L'}<L>[S]<R>{R'}"),
            expected(&[&["{L' S* R'}", "{A}<L>[S]<R>{B}"]])
        );
    }

    #[test]
    fn test_strand_leak_joined_strands() {
        // The incumbent upper strand continues into the left gate.
        assert!(strand_leak("<L1 S R1>", "[a]::{L'}<L>[S]<R>{R'}").is_empty());
        assert_eq!(
            strand_leak("<L1 S R1>", "[a]:{L'}<L>[S]<R>{R'}"),
            expected(&[&["<L S R>", "[a]:{L'}<L1>[S]<R1>{R'}"]])
        );
    }

    #[test]
    fn test_toehold_leak_start() {
        assert_eq!(
            toehold_leak("{L'}<L>[t^ S]<R>{R'}", "<A S B>"),
            expected(&[&["{L' t^*}<A>[S]<B>{R'}", "<L t^ S R>"]])
        );
        // The invader would carry on into the toehold: that is a strand leak.
        assert!(toehold_leak("{L'}<L>[t^ S]<R>{R'}", "<A t^ S B>").is_empty());
        assert!(toehold_leak("{L'}<L>[S]<R>{R'}", "<A S B>").is_empty());
    }

    #[test]
    fn test_toehold_leak_end() {
        assert_eq!(
            toehold_leak("<A S B>", "{L'}<L>[S t^]<R>{R'}"),
            expected(&[&["{L'}<A>[S]<B>{t^* R'}", "<L S t^ R>"]])
        );
    }

    #[test]
    fn test_toehold_leak_lower() {
        assert_eq!(
            toehold_leak("{A S* B}", "{L'}<L>[t^ S]<R>{R'}"),
            expected(&[&["{A}<L t^>[S]<R>{B}", "{L' t^* S* R'}"]])
        );
    }

    #[test]
    fn test_rate() {
        let r: Vec<_> = StrandLeakage::default()
            .novel_reactions(&complex("<L1 S R1>"), &complex("{L'}<L>[S]<R>{R'}"))
            .collect();
        assert_eq!(r[0].rate, 0.000003);
    }
}
