//! Reaction enumeration over a population of complexes.
//!
//! The [`Enumerator`] answers the question a stochastic simulator keeps
//! asking: which reactions can fire in the current state? It can also
//! explore the network reachable from an initial state.

use std::fmt;

use ahash::AHashMap;
use ahash::AHashSet;
use itertools::Itertools;
use log::debug;
use log::info;

use dsd_structure::Complex;
use dsd_structure::NotationError;

use crate::RateModel;
use crate::Reaction;
use crate::rules::BinaryRule;
use crate::rules::Binding;
use crate::rules::Covering;
use crate::rules::Displacement;
use crate::rules::Migration;
use crate::rules::StrandLeakage;
use crate::rules::ToeholdLeakage;
use crate::rules::Unbinding;
use crate::rules::UnaryRule;

/// Copy numbers by species.
pub type State = AHashMap<Complex, usize>;

/// Error type for setting up an initial state.
#[derive(Debug, Clone, PartialEq)]
pub enum StateError {
    /// A species could not be read as a complex.
    InvalidSpecies { species: String, source: NotationError },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::InvalidSpecies { species, source } => {
                write!(f, "invalid species '{species}': {source}")
            }
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StateError::InvalidSpecies { source, .. } => Some(source),
        }
    }
}

/// Canonicalizes the species of an initial state. Entries that describe
/// the same complex are merged.
pub fn canonical_state<'a, I>(entries: I) -> Result<State, StateError>
where
    I: IntoIterator<Item = (&'a str, usize)>,
{
    let mut state = State::default();
    for (species, count) in entries {
        let complex = Complex::try_from(species).map_err(|source| StateError::InvalidSpecies {
            species: species.to_string(),
            source,
        })?;
        *state.entry(complex).or_insert(0) += count;
    }
    Ok(state)
}

/// Result of a reachability exploration.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub species: Vec<Complex>,
    pub reactions: Vec<Reaction>,
    /// False if the round limit stopped the exploration.
    pub complete: bool,
}

pub struct Enumerator {
    unary: Vec<Box<dyn UnaryRule>>,
    binary: Vec<Box<dyn BinaryRule>>,
}

impl Default for Enumerator {
    fn default() -> Self {
        Enumerator::with_rates(RateModel::default())
    }
}

impl Enumerator {
    /// No rules at all, see [`Enumerator::unary_rule`] and
    /// [`Enumerator::binary_rule`].
    pub fn empty() -> Self {
        Enumerator { unary: Vec::new(), binary: Vec::new() }
    }

    /// All rule families.
    pub fn with_rates(rates: RateModel) -> Self {
        Enumerator::empty()
            .binary_rule(Binding::new(rates.clone()))
            .unary_rule(Unbinding::new(rates.clone()))
            .unary_rule(Covering::new(rates.clone()))
            .unary_rule(Migration::new(rates.clone()))
            .unary_rule(Displacement::new(rates.clone()))
            .binary_rule(StrandLeakage::new(rates.clone()))
            .binary_rule(ToeholdLeakage::new(rates))
    }

    pub fn unary_rule(mut self, rule: impl UnaryRule + 'static) -> Self {
        self.unary.push(Box::new(rule));
        self
    }

    pub fn binary_rule(mut self, rule: impl BinaryRule + 'static) -> Self {
        self.binary.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.unary.iter().map(|r| r.name()).chain(self.binary.iter().map(|r| r.name())).collect()
    }

    /// All reactions possible in `state`, in a deterministic order.
    ///
    /// Unary rules see every species present, binary rules every pair of
    /// distinct species and every species with at least two copies paired
    /// with itself.
    pub fn novel_reactions(&self, state: &State) -> Vec<Reaction> {
        let present: Vec<(String, &Complex, usize)> = state
            .iter()
            .filter(|&(_, &n)| n > 0)
            .map(|(c, &n)| (c.to_string(), c, n))
            .sorted_by(|a, b| a.0.cmp(&b.0))
            .collect();

        let mut reactions = Vec::new();
        for (_, complex, _) in &present {
            for rule in &self.unary {
                reactions.extend(rule.novel_reactions(complex));
            }
        }
        for ((_, a, _), (_, b, _)) in present.iter().tuple_combinations() {
            for rule in &self.binary {
                reactions.extend(rule.novel_reactions(a, b));
            }
        }
        for (_, a, n) in &present {
            if *n >= 2 {
                for rule in &self.binary {
                    reactions.extend(rule.novel_reactions(a, a));
                }
            }
        }
        debug!("{} reactions among {} species", reactions.len(), present.len());
        reactions
    }

    /// Explores the species reachable from `state` for at most `max_rounds`
    /// rounds. Every species is assumed to be present in multiple copies.
    pub fn reachable(&self, state: &State, max_rounds: usize) -> Network {
        let mut known: AHashSet<Complex> = state.keys().cloned().collect();
        let mut species: Vec<Complex> = state.keys().cloned().sorted_by_key(|c| c.to_string()).collect();
        let mut seen: AHashSet<String> = AHashSet::default();
        let mut network = Network::default();

        for round in 0..max_rounds {
            let current: State = species.iter().map(|c| (c.clone(), 2)).collect();
            let mut fresh = Vec::new();
            for reaction in self.novel_reactions(&current) {
                if !seen.insert(reaction.to_string()) {
                    continue;
                }
                for product in &reaction.products {
                    if known.insert(product.clone()) {
                        fresh.push(product.clone());
                    }
                }
                network.reactions.push(reaction);
            }
            info!("round {round}: {} new species, {} reactions", fresh.len(), network.reactions.len());
            if fresh.is_empty() {
                network.species = species;
                network.complete = true;
                return network;
            }
            species.extend(fresh);
        }
        network.species = species;
        network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The initial state of the classic AND-gate example.
    fn example_state() -> State {
        canonical_state([
            ("<t^ b>", 10),
            ("{t^*}[x t^]:[b t^]:[a t^]:[a]", 40),
            ("[x]:[t^ b]:[t^ b]:[t^ a]{t^*}", 40),
            ("<t^ x>", 40),
            ("<t^ a>", 40),
            ("<b t^>", 40),
        ])
        .unwrap()
    }

    #[test]
    fn test_canonical_state() {
        let state = canonical_state([("<a b>", 1), ("< a  b >", 2), ("[x]<y>", 3)]).unwrap();
        assert_eq!(state.len(), 2);
        assert_eq!(state.get(&Complex::try_from("<a b>").unwrap()), Some(&3));

        let err = canonical_state([("<a b>", 1), ("[x", 2)]).unwrap_err();
        assert!(matches!(err, StateError::InvalidSpecies { ref species, .. } if species == "[x"));
    }

    #[test]
    fn test_rule_selection() {
        assert_eq!(Enumerator::default().rule_names().len(), 7);
        let only_binding = Enumerator::empty().binary_rule(Binding::default());
        assert_eq!(only_binding.rule_names(), vec!["binding"]);

        let state = canonical_state([("{L' N^* R'}", 1), ("<L N^ R>", 1)]).unwrap();
        let reactions = only_binding.novel_reactions(&state);
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].products[0].to_string(), "{L'}<L>[N^]<R>{R'}");
    }

    #[test]
    fn test_self_pairs_need_two_copies() {
        let only_binding = Enumerator::empty().binary_rule(Binding::default());
        let one = canonical_state([("<a^ b a^*>", 1)]).unwrap();
        assert!(only_binding.novel_reactions(&one).is_empty());
        let two = canonical_state([("<a^ b a^*>", 2)]).unwrap();
        assert!(!only_binding.novel_reactions(&two).is_empty());
    }

    #[test]
    fn test_deterministic_order() {
        let enumerator = Enumerator::default();
        let state = example_state();
        let first: Vec<String> = enumerator.novel_reactions(&state).iter().map(|r| r.to_string()).collect();
        let again: Vec<String> = enumerator.novel_reactions(&state).iter().map(|r| r.to_string()).collect();
        assert!(!first.is_empty());
        assert_eq!(first, again);
    }

    #[test]
    fn test_example_binds_input() {
        let reactions = Enumerator::default().novel_reactions(&example_state());
        let input = Complex::try_from("<t^ x>").unwrap();
        let gate = Complex::try_from("{t^*}[x t^]:[b t^]:[a t^]:[a]").unwrap();
        let bound = Complex::try_from("[t^]<x>:[x t^]:[b t^]:[a t^]:[a]").unwrap();
        assert!(reactions.iter().any(|r| {
            r.reactants.contains(&input) && r.reactants.contains(&gate) && r.products == vec![bound.clone()]
        }));
    }

    #[test]
    fn test_products_are_canonical() {
        for reaction in Enumerator::default().novel_reactions(&example_state()) {
            for product in &reaction.products {
                assert_eq!(&product.clone().canonicalize().unwrap(), product, "{reaction}");
            }
        }
    }

    #[test]
    fn test_reachable() {
        let state = canonical_state([("{L' N^* R'}", 1), ("<L N^ R>", 1)]).unwrap();
        let network = Enumerator::default().reachable(&state, 10);
        assert!(network.complete);
        assert_eq!(network.species.len(), 3);
        // binding and its reverse
        assert_eq!(network.reactions.len(), 2);

        let network = Enumerator::default().reachable(&example_state(), 1);
        assert!(!network.complete);
        assert!(network.species.len() > 6);
    }
}
