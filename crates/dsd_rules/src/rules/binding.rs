//! Binding: two complexes hybridize on a pair of complementary toeholds.
//!
//! The new one-domain duplex becomes a gate of its own, joined to the rest
//! of both reactants by the connectors their strands continue across.

use itertools::Itertools;
use log::trace;

use dsd_structure::Assembly;
use dsd_structure::Complex;
use dsd_structure::Connector;
use dsd_structure::Domain;
use dsd_structure::Gate;
use dsd_structure::Orientation;
use dsd_structure::Side;
use dsd_structure::Strand;

use crate::RateModel;
use crate::Reaction;
use crate::rules::BinaryRule;
use crate::rules::Chain;
use crate::rules::Reactions;
use crate::rules::emit;
use crate::rules::settle;

#[derive(Debug, Clone, Default)]
pub struct Binding {
    rates: RateModel,
}

impl Binding {
    pub fn new(rates: RateModel) -> Self {
        Binding { rates }
    }
}

impl BinaryRule for Binding {
    fn name(&self) -> &'static str {
        "binding"
    }

    fn novel_reactions(&self, first: &Complex, second: &Complex) -> Reactions {
        let found = match (first.as_strand(), second.as_strand()) {
            (Some(a), Some(b)) => strand_strand(a, b),
            (Some(s), None) => strand_gate(s, second),
            (None, Some(s)) => strand_gate(s, first),
            (None, None) => gate_gate(first, second),
        };
        found
            .into_iter()
            .unique()
            .map(|(product, toehold)| {
                let rate = self.rates.binding_rate_of(&toehold);
                emit(self.name(), Reaction::new(vec![first.clone(), second.clone()], vec![product], rate))
            })
            .collect::<Vec<_>>()
            .into_iter()
    }
}

/// Index pairs of complementary toeholds between an upper and a lower
/// domain sequence.
fn toehold_pairs(upper: &[Domain], lower: &[Domain]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (p, u) in upper.iter().enumerate().filter(|(_, d)| d.is_toehold()) {
        for (q, w) in lower.iter().enumerate().filter(|(_, d)| d.is_toehold()) {
            if u.is_complementary(w) {
                pairs.push((p, q));
            }
        }
    }
    pairs
}

/// The gate formed by pairing `upper[p]` with `lower[q]`.
fn nucleate(upper: &[Domain], p: usize, lower: &[Domain], q: usize) -> Gate {
    Gate {
        lower_left: lower[..q].to_vec(),
        upper_left: upper[..p].to_vec(),
        duplex: vec![upper[p].clone()],
        upper_right: upper[p + 1..].to_vec(),
        lower_right: lower[q + 1..].to_vec(),
    }
}

fn strand_strand(a: &Strand, b: &Strand) -> Vec<(Complex, Domain)> {
    // The second strand keeps its orientation.
    let (upper, lower) = match (a.orientation(), b.orientation()) {
        (Orientation::Upper, Orientation::Lower) => (a.clone(), b.clone()),
        (Orientation::Lower, Orientation::Upper) => (b.clone(), a.clone()),
        (Orientation::Upper, Orientation::Upper) => (b.clone(), a.rotate()),
        (Orientation::Lower, Orientation::Lower) => (a.rotate(), b.clone()),
    };
    toehold_pairs(upper.domains(), lower.domains())
        .into_iter()
        .map(|(p, q)| {
            let gate = nucleate(upper.domains(), p, lower.domains(), q);
            (settle(Complex::from_gate(gate)), upper.domains()[p].clone())
        })
        .collect()
}

fn strand_gate(strand: &Strand, complex: &Complex) -> Vec<(Complex, Domain)> {
    let Some(chain) = Chain::of(complex) else {
        return Vec::new();
    };
    let lower_form = strand.as_lower();
    let upper_form = strand.as_upper();

    let mut found = Vec::new();
    for i in 0..chain.len() {
        for side in [Side::Left, Side::Right] {
            for orientation in [Orientation::Upper, Orientation::Lower] {
                let overhang = chain.gates[i].overhang(side, orientation);
                let (upper, lower) = match orientation {
                    Orientation::Upper => (overhang.as_slice(), lower_form.domains()),
                    Orientation::Lower => (upper_form.domains(), overhang.as_slice()),
                };
                let pairs = toehold_pairs(upper, lower);
                if pairs.is_empty() {
                    continue;
                }
                if !chain.open_end(i, side, orientation) {
                    trace!("binding: {strand} cannot reach {side:?} overhang of gate {i} in {complex}");
                    continue;
                }
                let join = orientation.connector();
                for (p, q) in pairs {
                    let nucleus = nucleate(upper, p, lower, q);
                    let mut gate = chain.gates[i].clone();
                    gate.overhang_mut(side, orientation).clear();

                    let mut assembly = Assembly::new();
                    chain.extend_head(&mut assembly, join, i);
                    let before = chain.link(i, Side::Left).unwrap_or(join);
                    match side {
                        Side::Left => assembly.join(before, nucleus).join(join, gate),
                        Side::Right => assembly.join(before, gate).join(join, nucleus),
                    };
                    chain.extend_tail(&mut assembly, chain.link(i, Side::Right).unwrap_or(join), i + 1);
                    found.push((settle(assembly.build()), upper[p].clone()));
                }
            }
        }
    }
    found
}

fn gate_gate(first: &Complex, second: &Complex) -> Vec<(Complex, Domain)> {
    let turned = settle(second.rotate());
    let mut arrangements = vec![(first, second), (first, &turned), (&turned, first)];
    if first != second {
        arrangements.push((second, first));
    }

    let mut found = Vec::new();
    for (left, right) in arrangements {
        let (Some(x), Some(y)) = (Chain::of(left), Chain::of(right)) else {
            continue;
        };
        let last = x.len() - 1;
        let (xg, yg) = (&x.gates[last], &y.gates[0]);

        // Upper strand of the left complex meets the lower strand of the right one.
        for (p, q) in toehold_pairs(&xg.upper_right, &yg.lower_left) {
            let nucleus = nucleate(&xg.upper_right, p, &yg.lower_left, q);
            let (mut xs, mut ys) = (x.gates.clone(), y.gates.clone());
            xs[last].upper_right.clear();
            ys[0].lower_left.clear();
            let product = join_chains((&xs[..], &x.links[..]), Connector::Upper, nucleus, Connector::Lower, (&ys[..], &y.links[..]));
            found.push((product, xg.upper_right[p].clone()));
        }

        // Lower strand of the left complex meets the upper strand of the right one.
        for (p, q) in toehold_pairs(&yg.upper_left, &xg.lower_right) {
            let nucleus = nucleate(&yg.upper_left, p, &xg.lower_right, q);
            let (mut xs, mut ys) = (x.gates.clone(), y.gates.clone());
            xs[last].lower_right.clear();
            ys[0].upper_left.clear();
            let product = join_chains((&xs[..], &x.links[..]), Connector::Lower, nucleus, Connector::Upper, (&ys[..], &y.links[..]));
            found.push((product, yg.upper_left[p].clone()));
        }
    }
    found
}

/// `left into nucleus out right`
fn join_chains(
    (left, left_links): (&[Gate], &[Connector]),
    into: Connector,
    nucleus: Gate,
    out: Connector,
    (right, right_links): (&[Gate], &[Connector]),
) -> Complex {
    let mut assembly = Assembly::new();
    assembly.extend(into, left, left_links);
    assembly.join(into, nucleus);
    assembly.extend(out, right, right_links);
    settle(assembly.build())
}
