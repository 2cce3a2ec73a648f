//! Single strands and their orientation.
//!
//! An upper strand `<...>` is read left to right 5' to 3', a lower strand
//! `{...}` is drawn underneath in the reverse reading direction. Rotating a
//! strand by 180 degrees turns one into the other.

use std::fmt;
use itertools::Itertools;

use crate::Connector;
use crate::Domain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Upper,
    Lower,
}

impl Orientation {
    pub fn flip(self) -> Self {
        match self {
            Orientation::Upper => Orientation::Lower,
            Orientation::Lower => Orientation::Upper,
        }
    }

    /// The connector that continues a strand of this orientation into the
    /// next gate: upper strands cross `::`, lower strands cross `:`.
    pub fn connector(self) -> Connector {
        match self {
            Orientation::Upper => Connector::Upper,
            Orientation::Lower => Connector::Lower,
        }
    }

    pub(crate) fn brackets(self) -> (char, char) {
        match self {
            Orientation::Upper => ('<', '>'),
            Orientation::Lower => ('{', '}'),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Strand {
    orientation: Orientation,
    domains: Vec<Domain>,
}

impl Strand {
    pub fn new(orientation: Orientation, domains: Vec<Domain>) -> Self {
        Strand { orientation, domains }
    }

    pub fn upper(domains: Vec<Domain>) -> Self {
        Self::new(Orientation::Upper, domains)
    }

    pub fn lower(domains: Vec<Domain>) -> Self {
        Self::new(Orientation::Lower, domains)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn into_domains(self) -> Vec<Domain> {
        self.domains
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Reverse the domain order and flip the orientation.
    pub fn rotate(&self) -> Self {
        Strand {
            orientation: self.orientation.flip(),
            domains: self.domains.iter().rev().cloned().collect(),
        }
    }

    /// This strand as an upper strand, rotating it if necessary.
    pub fn as_upper(&self) -> Self {
        match self.orientation {
            Orientation::Upper => self.clone(),
            Orientation::Lower => self.rotate(),
        }
    }

    /// This strand as a lower strand, rotating it if necessary.
    pub fn as_lower(&self) -> Self {
        match self.orientation {
            Orientation::Upper => self.rotate(),
            Orientation::Lower => self.clone(),
        }
    }
}

/// Writes a bracketed domain sequence, nothing if it is empty.
pub(crate) fn write_group(
    f: &mut fmt::Formatter<'_>,
    (open, close): (char, char),
    domains: &[Domain],
) -> fmt::Result {
    if domains.is_empty() {
        return Ok(());
    }
    write!(f, "{open}{}{close}", domains.iter().join(" "))
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = self.orientation.brackets();
        write!(f, "{open}{}{close}", self.domains.iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doms(s: &str) -> Vec<Domain> {
        s.split_whitespace().map(|t| Domain::try_from(t).unwrap()).collect()
    }

    #[test]
    fn test_rotate() {
        let s = Strand::upper(doms("L N^ R*"));
        let r = s.rotate();
        assert_eq!(r.orientation(), Orientation::Lower);
        assert_eq!(r.to_string(), "{R* N^ L}");
        assert_eq!(r.rotate(), s);
    }

    #[test]
    fn test_orientation_forms() {
        let s = Strand::lower(doms("a b"));
        assert_eq!(s.as_lower(), s);
        assert_eq!(s.as_upper().to_string(), "<b a>");
        assert_eq!(Orientation::Upper.connector(), Connector::Upper);
        assert_eq!(Orientation::Lower.flip(), Orientation::Upper);
    }
}
