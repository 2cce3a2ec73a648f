//! Complexes: gates and strands joined by connectors.
//!
//! A canonical complex is either a single free strand or a chain of gates.
//! Raw complexes (straight from the parser or assembled by a rewrite) may
//! also contain lone strand segments, see [`Complex::canonicalize`].

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::Gate;
use crate::NotationError;
use crate::Orientation;
use crate::Strand;
use crate::canonical::tidy;
use crate::parse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    /// `:` the neighbours share a continuous lower strand.
    Lower,
    /// `::` the neighbours share a continuous upper strand.
    Upper,
}

impl Connector {
    /// Orientation of the strand that crosses this connector.
    pub fn shares(self) -> Orientation {
        match self {
            Connector::Lower => Orientation::Lower,
            Connector::Upper => Orientation::Upper,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Connector::Lower => Connector::Upper,
            Connector::Upper => Connector::Lower,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Connector::Lower => ":",
            Connector::Upper => "::",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Gate(Gate),
    Strand(Strand),
}

impl Segment {
    pub fn rotate(&self) -> Segment {
        match self {
            Segment::Gate(g) => Segment::Gate(g.rotate()),
            Segment::Strand(s) => Segment::Strand(s.rotate()),
        }
    }
}

impl From<Gate> for Segment {
    fn from(gate: Gate) -> Self {
        Segment::Gate(gate)
    }
}

impl From<Strand> for Segment {
    fn from(strand: Strand) -> Self {
        Segment::Strand(strand)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Gate(g) => write!(f, "{g}"),
            Segment::Strand(s) => write!(f, "{s}"),
        }
    }
}

/// Segments joined by connectors, `connectors.len() + 1 == segments.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Complex {
    pub(crate) segments: Vec<Segment>,
    pub(crate) connectors: Vec<Connector>,
}

impl Complex {
    /// A raw complex from the parser.
    pub(crate) fn from_parts(segments: Vec<Segment>, connectors: Vec<Connector>) -> Self {
        debug_assert_eq!(segments.len(), connectors.len() + 1, "connectors must join segments");
        Complex { segments, connectors }
    }

    pub fn from_strand(strand: Strand) -> Self {
        Complex { segments: vec![strand.into()], connectors: vec![] }
    }

    /// A raw single-gate complex.
    pub fn from_gate(gate: Gate) -> Self {
        Complex { segments: vec![gate.into()], connectors: vec![] }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// The strand, if this complex is a single free strand.
    pub fn as_strand(&self) -> Option<&Strand> {
        match self.segments.as_slice() {
            [Segment::Strand(s)] => Some(s),
            _ => None,
        }
    }

    pub fn is_strand(&self) -> bool {
        self.as_strand().is_some()
    }

    /// The gate segments, left to right.
    pub fn gates(&self) -> Vec<&Gate> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Gate(g) => Some(g),
                Segment::Strand(_) => None,
            })
            .collect()
    }

    /// The complex turned by 180 degrees. The result is raw: overhangs at
    /// joins sit on the wrong side until it is canonicalized again.
    pub fn rotate(&self) -> Complex {
        Complex {
            segments: self.segments.iter().rev().map(Segment::rotate).collect(),
            connectors: self.connectors.iter().rev().map(|c| c.flip()).collect(),
        }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.connectors[i - 1])?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for Complex {
    type Error = NotationError;

    /// Tidy, parse and canonicalize. Grammar errors name the text as given.
    fn try_from(text: &str) -> Result<Self, Self::Error> {
        let raw = parse(&tidy(text)).map_err(|e| match e {
            NotationError::MalformedNotation { reason, .. } => NotationError::malformed(text, reason),
            e => e,
        })?;
        raw.canonicalize()
    }
}

impl FromStr for Complex {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Complex::try_from(s)
    }
}

impl Serialize for Complex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Complex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Complex::try_from(text.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Incremental construction of raw complexes.
///
/// The connector passed to [`Assembly::join`] is dropped while the assembly
/// is still empty, so optional prefixes can be chained without special cases.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    segments: Vec<Segment>,
    connectors: Vec<Connector>,
}

impl Assembly {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn join(&mut self, connector: Connector, segment: impl Into<Segment>) -> &mut Self {
        if !self.segments.is_empty() {
            self.connectors.push(connector);
        }
        self.segments.push(segment.into());
        self
    }

    /// Appends a chain of gates linked by `links`.
    pub fn extend(&mut self, connector: Connector, gates: &[Gate], links: &[Connector]) -> &mut Self {
        debug_assert!(gates.is_empty() || links.len() + 1 == gates.len());
        for (i, gate) in gates.iter().enumerate() {
            let c = if i == 0 { connector } else { links[i - 1] };
            self.join(c, gate.clone());
        }
        self
    }

    pub fn build(self) -> Complex {
        Complex { segments: self.segments, connectors: self.connectors }
    }
}
