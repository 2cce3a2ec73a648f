//! Unbinding: a duplex held by a single toehold melts.
//!
//! The upper and lower strand parts of the gate separate. Each keeps the
//! neighbours it is joined to: an upper part follows `::`, a lower part
//! follows `:`.

use dsd_structure::Assembly;
use dsd_structure::Complex;
use dsd_structure::Connector;
use dsd_structure::Side;
use dsd_structure::Strand;

use crate::RateModel;
use crate::Reaction;
use crate::rules::Chain;
use crate::rules::Reactions;
use crate::rules::UnaryRule;
use crate::rules::emit;
use crate::rules::settle;

#[derive(Debug, Clone, Default)]
pub struct Unbinding {
    rates: RateModel,
}

impl Unbinding {
    pub fn new(rates: RateModel) -> Self {
        Unbinding { rates }
    }
}

impl UnaryRule for Unbinding {
    fn name(&self) -> &'static str {
        "unbinding"
    }

    fn novel_reactions(&self, reactant: &Complex) -> Reactions {
        let Some(chain) = Chain::of(reactant) else {
            return Vec::new().into_iter();
        };
        let mut reactions = Vec::new();
        for (i, gate) in chain.gates.iter().enumerate() {
            if !gate.has_toehold_duplex() {
                continue;
            }
            let mut upper = Assembly::new();
            let mut lower = Assembly::new();

            match chain.link(i, Side::Left) {
                Some(Connector::Upper) => chain.extend_head(&mut upper, Connector::Upper, i),
                Some(Connector::Lower) => chain.extend_head(&mut lower, Connector::Lower, i),
                None => (),
            }
            upper.join(Connector::Upper, Strand::upper(gate.upper_strand()));
            lower.join(Connector::Lower, Strand::lower(gate.lower_strand()));
            match chain.link(i, Side::Right) {
                Some(Connector::Upper) => chain.extend_tail(&mut upper, Connector::Upper, i + 1),
                Some(Connector::Lower) => chain.extend_tail(&mut lower, Connector::Lower, i + 1),
                None => (),
            }

            let products = vec![settle(upper.build()), settle(lower.build())];
            let reaction = Reaction::new(vec![reactant.clone()], products, self.rates.unbinding_rate);
            reactions.push(emit(self.name(), reaction));
        }
        reactions.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::BinaryRule;
    use crate::rules::Binding;
    use crate::rules::testing::*;

    fn unbind(text: &str) -> Vec<Vec<String>> {
        outcomes(Unbinding::default().novel_reactions(&complex(text)))
    }

    #[test]
    fn test_single_gate() {
        assert_eq!(unbind("{L'}<L>[N^]<R>{R'}"), expected(&[&["{L' N^* R'}", "<L N^ R>"]]));
        assert_eq!(unbind("[N^]"), expected(&[&["{N^*}", "<N^>"]]));
        assert!(unbind("{L'}<L>[N]<R>{R'}").is_empty());
        assert!(unbind("{L'}<L>[N^ S]<R>{R'}").is_empty());
        assert!(unbind("<L N^ R>").is_empty());
    }

    #[test]
    fn test_gate_chain() {
        assert_eq!(unbind("[a]::<b>[t^]:{c}[d]"), expected(&[&["[a]<b t^>", "{t^* c}[d]"]]));
        assert_eq!(unbind("[x]:[t^]<y>::[z]"), expected(&[&["[x]{t^*}", "<t^ y>[z]"]]));
        assert_eq!(
            unbind("{a}[t^]::[b]:[u^]"),
            expected(&[&["<t^>[b]:[u^]", "{a t^*}"], &["{a}[t^]::[b]{u^*}", "<u^>"]])
        );
    }

    #[test]
    fn test_inverse_of_binding() {
        let binding = Binding::default();
        let unbinding = Unbinding::default();
        for (a, b) in [("{L' N^* R'}", "<L N^ R>"), ("[a]<b t^>", "{t^* c}[d]"), ("<t^ x y>", "{t^*}[x]:[y u^]")] {
            let (a, b) = (complex(a), complex(b));
            for bound in binding.novel_reactions(&a, &b) {
                let mut back: Vec<Vec<String>> = unbinding
                    .novel_reactions(&bound.products[0])
                    .map(|r| r.sorted_products())
                    .collect();
                let mut pair = vec![a.to_string(), b.to_string()];
                pair.sort();
                back.retain(|p| *p == pair);
                assert_eq!(back.len(), 1, "{} does not unbind into {a} + {b}", bound.products[0]);
            }
        }
    }

    #[test]
    fn test_rate() {
        let r: Vec<_> = Unbinding::default().novel_reactions(&complex("[N^]")).collect();
        assert_eq!(r[0].rate, 0.1126);
    }
}
