//! Domains: the atomic units of the notation.
//!
//! A domain is written as its label, optionally followed by `^` (toehold)
//! and `*` (complement), e.g. `x`, `t^`, `t^*`, `L'`.

use std::fmt;
use std::str::FromStr;

use crate::NotationError;

/// Characters with a structural meaning that cannot be part of a label.
const RESERVED: &[char] = &['<', '>', '{', '}', '[', ']', ':', '^', '*'];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain {
    name: String,
    toehold: bool,
    complement: bool,
}

impl Domain {
    pub fn new(name: impl Into<String>, toehold: bool, complement: bool) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty());
        Domain { name, toehold, complement }
    }

    /// A long (non-toehold) domain.
    pub fn long(name: impl Into<String>) -> Self {
        Self::new(name, false, false)
    }

    pub fn toehold(name: impl Into<String>) -> Self {
        Self::new(name, true, false)
    }

    /// The label, without `^` or `*`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_toehold(&self) -> bool {
        self.toehold
    }

    pub fn is_complement(&self) -> bool {
        self.complement
    }

    /// The same domain with the `*` flag flipped.
    pub fn complement(&self) -> Self {
        Domain {
            name: self.name.clone(),
            toehold: self.toehold,
            complement: !self.complement,
        }
    }

    /// Same label, exactly one of the two carries `*`.
    pub fn is_complementary(&self, other: &Domain) -> bool {
        self.name == other.name && self.complement != other.complement
    }
}

/// Complements every domain of a sequence, keeping the order.
pub fn complement_all(domains: &[Domain]) -> Vec<Domain> {
    domains.iter().map(Domain::complement).collect()
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.toehold {
            write!(f, "^")?;
        }
        if self.complement {
            write!(f, "*")?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for Domain {
    type Error = NotationError;

    fn try_from(token: &str) -> Result<Self, Self::Error> {
        let mut rest = token;
        let complement = if let Some(r) = rest.strip_suffix('*') {
            rest = r;
            true
        } else {
            false
        };
        let toehold = if let Some(r) = rest.strip_suffix('^') {
            rest = r;
            true
        } else {
            false
        };
        if rest.is_empty() {
            return Err(NotationError::malformed(token, "domain without a label"));
        }
        if rest.chars().any(|c| c.is_whitespace() || RESERVED.contains(&c)) {
            return Err(NotationError::malformed(token, "unexpected character in domain"));
        }
        Ok(Domain::new(rest, toehold, complement))
    }
}

impl FromStr for Domain {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_tokens() {
        let d = Domain::try_from("N^*").unwrap();
        assert_eq!(d.name(), "N");
        assert!(d.is_toehold());
        assert!(d.is_complement());
        assert_eq!(d.to_string(), "N^*");

        let d = Domain::try_from("L'").unwrap();
        assert_eq!(d, Domain::long("L'"));
        assert_eq!(Domain::try_from("x*").unwrap(), Domain::new("x", false, true));
    }

    #[test]
    fn test_domain_token_errors() {
        assert!(Domain::try_from("^").is_err());
        assert!(Domain::try_from("*").is_err());
        assert!(Domain::try_from("a*^").is_err());
        assert!(Domain::try_from("a^b").is_err());
        assert!(Domain::try_from("a:b").is_err());
    }

    #[test]
    fn test_complementarity() {
        let t = Domain::toehold("t");
        assert!(t.is_complementary(&t.complement()));
        assert!(t.complement().is_complementary(&t));
        assert!(!t.is_complementary(&t));
        assert!(!t.is_complementary(&Domain::toehold("u").complement()));
        assert_eq!(t.complement().complement(), t);
    }
}
