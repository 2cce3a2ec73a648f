//! Covering: a duplex grows by one toehold pair at one of its ends.
//!
//! On the right of gate `i` the single-stranded region next to the duplex
//! may be owned by gate `i + 1`, depending on which strand the connector
//! shares. On the left it is always owned by gate `i`. Covering never
//! merges two duplexes.

use dsd_structure::Complex;
use dsd_structure::Connector;
use dsd_structure::Domain;
use dsd_structure::Side;

use crate::RateModel;
use crate::Reaction;
use crate::rules::Chain;
use crate::rules::Reactions;
use crate::rules::UnaryRule;
use crate::rules::emit;

#[derive(Debug, Clone, Default)]
pub struct Covering {
    rates: RateModel,
}

impl Covering {
    pub fn new(rates: RateModel) -> Self {
        Covering { rates }
    }
}

fn covers(upper: Option<&Domain>, lower: Option<&Domain>) -> bool {
    match (upper, lower) {
        (Some(u), Some(w)) => u.is_toehold() && u.is_complementary(w),
        _ => false,
    }
}

impl UnaryRule for Covering {
    fn name(&self) -> &'static str {
        "covering"
    }

    fn novel_reactions(&self, reactant: &Complex) -> Reactions {
        let Some(chain) = Chain::of(reactant) else {
            return Vec::new().into_iter();
        };
        let mut products = Vec::new();
        for i in 0..chain.len() {
            let gate = &chain.gates[i];
            if covers(gate.upper_left.last(), gate.lower_left.last()) {
                let mut gates = chain.gates.clone();
                let g = &mut gates[i];
                g.lower_left.pop();
                if let Some(d) = g.upper_left.pop() {
                    g.duplex.insert(0, d);
                }
                products.push(chain.rebuild(&gates));
            }

            let mut gates = chain.gates.clone();
            let (head, tail) = gates.split_at_mut(i + 1);
            let (g, next) = (&mut head[i], tail.first_mut());
            let (upper, lower): (&mut Vec<Domain>, &mut Vec<Domain>) =
                match (chain.link(i, Side::Right), next) {
                    (Some(Connector::Upper), Some(n)) => (&mut n.upper_left, &mut g.lower_right),
                    (Some(Connector::Lower), Some(n)) => (&mut g.upper_right, &mut n.lower_left),
                    _ => (&mut g.upper_right, &mut g.lower_right),
                };
            if covers(upper.first(), lower.first()) {
                let d = upper.remove(0);
                lower.remove(0);
                gates[i].duplex.push(d);
                products.push(chain.rebuild(&gates));
            }
        }
        products
            .into_iter()
            .map(|p| emit(self.name(), Reaction::new(vec![reactant.clone()], vec![p], self.rates.covering_rate)))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::*;

    fn cover(text: &str) -> Vec<Vec<String>> {
        outcomes(Covering::default().novel_reactions(&complex(text)))
    }

    #[test]
    fn test_cover_right() {
        assert_eq!(cover("{L'}<L>[S]<N^ R>{N^* R'}"), expected(&[&["{L'}<L>[S N^]<R>{R'}"]]));
        assert!(cover("{L'}<L>[S]<N R>{N* R'}").is_empty());
        assert!(cover("{L'}<L>[S]<N^ R>{R' N^*}").is_empty());
    }

    #[test]
    fn test_cover_left() {
        assert_eq!(cover("{L' N^*}<L N^>[S]<R>{R'}"), expected(&[&["{L'}<L>[N^ S]<R>{R'}"]]));
    }

    #[test]
    fn test_cover_across_connectors() {
        assert_eq!(cover("[a]{t^*}::<t^ b>[c]"), expected(&[&["[a t^]::<b>[c]"]]));
        assert_eq!(cover("[a]<t^>:{t^* b}[c]"), expected(&[&["[a t^]:{b}[c]"]]));
        assert_eq!(cover("[a]:{c t^*}<b t^>[d]"), expected(&[&["[a]:{c}<b>[t^ d]"]]));
    }

    #[test]
    fn test_both_ends() {
        assert_eq!(
            cover("{t^*}<t^>[x]<u^>{u^*}"),
            expected(&[&["[t^ x]<u^>{u^*}"], &["{t^*}<t^>[x u^]"]])
        );
    }
}
