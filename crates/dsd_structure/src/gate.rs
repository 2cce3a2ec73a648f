//! Gates: one duplex with up to four single-stranded overhangs.
//!
//! ```text
//!   {lower_left}<upper_left>[duplex]<upper_right>{lower_right}
//! ```
//!
//! Duplex domains are stored in their upper-strand form. The lower strand
//! of a gate reads `lower_left`, the complement of the duplex, `lower_right`.

use std::fmt;

use crate::Domain;
use crate::Orientation;
use crate::complement_all;
use crate::strand::write_group;

/// Left or right of the duplex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Gate {
    pub lower_left: Vec<Domain>,
    pub upper_left: Vec<Domain>,
    pub duplex: Vec<Domain>,
    pub upper_right: Vec<Domain>,
    pub lower_right: Vec<Domain>,
}

impl Gate {
    /// A gate without overhangs.
    pub fn new(duplex: Vec<Domain>) -> Self {
        Gate { duplex, ..Default::default() }
    }

    pub fn overhang(&self, side: Side, orientation: Orientation) -> &Vec<Domain> {
        match (side, orientation) {
            (Side::Left, Orientation::Lower) => &self.lower_left,
            (Side::Left, Orientation::Upper) => &self.upper_left,
            (Side::Right, Orientation::Upper) => &self.upper_right,
            (Side::Right, Orientation::Lower) => &self.lower_right,
        }
    }

    pub fn overhang_mut(&mut self, side: Side, orientation: Orientation) -> &mut Vec<Domain> {
        match (side, orientation) {
            (Side::Left, Orientation::Lower) => &mut self.lower_left,
            (Side::Left, Orientation::Upper) => &mut self.upper_left,
            (Side::Right, Orientation::Upper) => &mut self.upper_right,
            (Side::Right, Orientation::Lower) => &mut self.lower_right,
        }
    }

    /// All domains of the upper strand part held by this gate.
    pub fn upper_strand(&self) -> Vec<Domain> {
        [&self.upper_left[..], &self.duplex[..], &self.upper_right[..]].concat()
    }

    /// All domains of the lower strand part held by this gate.
    pub fn lower_strand(&self) -> Vec<Domain> {
        [&self.lower_left[..], &complement_all(&self.duplex)[..], &self.lower_right[..]].concat()
    }

    /// Single toehold duplex, e.g. `[t^]` but not `[t^ x]`.
    pub fn has_toehold_duplex(&self) -> bool {
        self.duplex.len() == 1 && self.duplex[0].is_toehold()
    }

    /// The same gate rotated by 180 degrees: upper and lower strands swap
    /// roles, every domain sequence is reversed.
    pub fn rotate(&self) -> Gate {
        let rev = |v: &[Domain]| v.iter().rev().cloned().collect::<Vec<_>>();
        Gate {
            lower_left: rev(&self.upper_right),
            upper_left: rev(&self.lower_right),
            duplex: complement_all(&rev(&self.duplex)),
            upper_right: rev(&self.lower_left),
            lower_right: rev(&self.upper_left),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_group(f, Orientation::Lower.brackets(), &self.lower_left)?;
        write_group(f, Orientation::Upper.brackets(), &self.upper_left)?;
        write_group(f, ('[', ']'), &self.duplex)?;
        write_group(f, Orientation::Upper.brackets(), &self.upper_right)?;
        write_group(f, Orientation::Lower.brackets(), &self.lower_right)
    }
}
