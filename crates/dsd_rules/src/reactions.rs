use std::fmt;
use itertools::Itertools;
use serde::Serialize;

use dsd_structure::Complex;

/// One candidate transition: reactants are consumed, products released.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reaction {
    pub reactants: Vec<Complex>,
    pub products: Vec<Complex>,
    pub rate: f64,
}

impl Reaction {
    pub fn new(reactants: Vec<Complex>, products: Vec<Complex>, rate: f64) -> Self {
        Reaction { reactants, products, rate }
    }

    /// Products in a stable order, for comparisons that ignore emission order.
    pub fn sorted_products(&self) -> Vec<String> {
        self.products.iter().map(|p| p.to_string()).sorted().collect()
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} [{:e}]",
            self.reactants.iter().join(" + "),
            self.products.iter().join(" + "),
            self.rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let r = Reaction::new(
            vec![Complex::try_from("{L'}<L>[N^]<R>{R'}").unwrap()],
            vec![Complex::try_from("<L N^ R>").unwrap(), Complex::try_from("{L' N^* R'}").unwrap()],
            0.1126,
        );
        assert_eq!(r.to_string(), "{L'}<L>[N^]<R>{R'} -> <L N^ R> + {L' N^* R'} [1.126e-1]");
        assert_eq!(r.sorted_products(), vec!["<L N^ R>", "{L' N^* R'}"]);
    }
}
