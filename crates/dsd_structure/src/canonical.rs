//! Canonical form of complexes.
//!
//! Many texts describe the same structure. The canonical form is reached
//! by a few structural passes repeated until nothing changes:
//!
//!  - empty lone strands are dropped,
//!  - lone strands are absorbed into a neighbouring gate,
//!  - at every join, the overhang shared by both gates is owned by the right
//!    one.

use itertools::Itertools;
use log::trace;

use crate::Complex;
use crate::Connector;
use crate::NotationError;
use crate::Segment;
use crate::Side;
use crate::Strand;

/// Upper bound on the rounds of structural passes. Every pass strictly
/// reduces segments or moves domains rightwards, so a handful is plenty.
pub const MAX_CANONICAL_ROUNDS: usize = 16;

const DELIMITERS: &[char] = &['<', '>', '{', '}', '[', ']', ':'];

/// Text level cleanup: collapse whitespace, strip it next to brackets and
/// connectors, and remove empty brackets.
///
/// Whitespace between two `:` is kept, and an empty bracket group leaves a
/// blank behind, so neither can fuse two connectors into one. The parser
/// then reports the empty segment.
pub fn tidy(text: &str) -> String {
    let mut out = text.to_string();
    loop {
        let collapsed: Vec<char> = out.split_whitespace().join(" ").chars().collect();
        let stripped: String = collapsed
            .iter()
            .enumerate()
            .filter(|&(i, &c)| {
                if c != ' ' {
                    return true;
                }
                let (prev, next) = (collapsed[i - 1], collapsed[i + 1]);
                (prev == ':' && next == ':') || !(DELIMITERS.contains(&prev) || DELIMITERS.contains(&next))
            })
            .map(|(_, &c)| c)
            .collect();
        let mut emptied = stripped.clone();
        for empty in ["<>", "{}", "[]"] {
            emptied = emptied.replace(empty, " ");
        }
        if emptied == out {
            return out;
        }
        out = emptied;
    }
}

impl Complex {
    /// Normal form of this complex. Idempotent.
    pub fn canonicalize(self) -> Result<Complex, NotationError> {
        let mut current = self;
        for round in 0..MAX_CANONICAL_ROUNDS {
            let mut next = current.clone();
            next.drop_empty_strands()?;
            next.merge_lone_strands()?;
            next.reformat();
            if next == current {
                return Ok(next);
            }
            trace!("canonical round {round}: {current} -> {next}");
            current = next;
        }
        Err(NotationError::NoFixedPoint(current.to_string()))
    }

    fn drop_empty_strands(&mut self) -> Result<(), NotationError> {
        if self.segments.iter().any(|s| matches!(s, Segment::Gate(g) if g.duplex.is_empty())) {
            return Err(NotationError::EmptyDuplex(self.to_string()));
        }
        while let Some(i) = self.segments.iter().position(|s| match s {
            Segment::Strand(s) => s.is_empty(),
            Segment::Gate(_) => false,
        }) {
            self.segments.remove(i);
            if !self.connectors.is_empty() {
                self.connectors.remove(i.min(self.connectors.len() - 1));
            }
        }
        if self.segments.is_empty() {
            return Err(NotationError::EmptyComplex);
        }
        Ok(())
    }

    fn merge_lone_strands(&mut self) -> Result<(), NotationError> {
        if self.segments.len() < 2 {
            return Ok(());
        }

        // Neighbouring strands that continue into each other.
        let mut i = 0;
        while i + 1 < self.segments.len() {
            if let (Segment::Strand(a), Segment::Strand(b)) = (&self.segments[i], &self.segments[i + 1])
                && a.orientation() == b.orientation()
                && self.connectors[i] == a.orientation().connector()
            {
                let joined = Strand::new(a.orientation(), [a.domains(), b.domains()].concat());
                self.segments[i] = joined.into();
                self.segments.remove(i + 1);
                self.connectors.remove(i);
            } else {
                i += 1;
            }
        }
        if self.segments.len() < 2 {
            return Ok(());
        }

        for (i, segment) in self.segments.iter().enumerate() {
            let Segment::Strand(s) = segment else { continue };
            let expected = s.orientation().connector();
            let left = i.checked_sub(1).map(|j| self.connectors[j]);
            let right = self.connectors.get(i).copied();
            if left.is_some_and(|c| c != expected) || right.is_some_and(|c| c != expected) {
                return Err(NotationError::DetachedStrand(self.to_string()));
            }
        }

        while let Some((i, strand)) = self.segments.iter().enumerate().find_map(|(i, s)| match s {
            Segment::Strand(s) => Some((i, s.clone())),
            Segment::Gate(_) => None,
        }) {
            self.segments.remove(i);
            let orientation = strand.orientation();
            if let Some(Segment::Gate(next)) = self.segments.get_mut(i) {
                let overhang = next.overhang_mut(Side::Left, orientation);
                let mut domains = strand.into_domains();
                domains.append(overhang);
                *overhang = domains;
                self.connectors.remove(i);
            } else if let Some(Segment::Gate(prev)) = i.checked_sub(1).and_then(|j| self.segments.get_mut(j)) {
                prev.overhang_mut(Side::Right, orientation).extend(strand.into_domains());
                self.connectors.remove(i - 1);
            } else {
                self.segments.insert(i, strand.into());
                return Err(NotationError::DetachedStrand(self.to_string()));
            }
        }
        Ok(())
    }

    fn reformat(&mut self) {
        for (i, connector) in self.connectors.iter().enumerate() {
            let [Segment::Gate(left), Segment::Gate(right)] = &mut self.segments[i..i + 2] else {
                continue;
            };
            let (moved, into) = match connector {
                Connector::Upper => (&mut left.upper_right, &mut right.upper_left),
                Connector::Lower => (&mut left.lower_right, &mut right.lower_left),
            };
            moved.append(into);
            std::mem::swap(moved, into);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn canonical(text: &str) -> String {
        Complex::try_from(text).unwrap().to_string()
    }

    #[test]
    fn test_tidy() {
        assert_eq!(tidy("  { L' }  < L >[ N^ ]  ::  [x] "), "{L'}<L>[N^]::[x]");
        assert_eq!(tidy("<a   b>"), "<a b>");
        assert_eq!(tidy("{ }<>[a]< >"), "[a]");
        assert_eq!(tidy("<{}>[a]"), "[a]");
        assert_eq!(tidy("[a] : : [b]"), "[a]: :[b]");
        assert_eq!(tidy("[a]:[]:[b]"), "[a]: :[b]");
        assert_eq!(tidy("[a]:<>[b]"), "[a]:[b]");
    }

    #[test]
    fn test_connectors_do_not_fuse() {
        for text in ["[a] : : [b]", "[a]:[]:[b]", "[a]::<>:[b]", "[a]:{ }"] {
            let err = Complex::try_from(text).unwrap_err();
            assert!(
                matches!(err, NotationError::MalformedNotation { ref notation, .. } if notation == text),
                "{text} gave {err:?}"
            );
        }
        assert_eq!(canonical("[a] :: [b]"), "[a]::[b]");
    }

    #[test]
    fn test_reformat() {
        assert_eq!(canonical("{A}<B>[C]<D>{E}::{F}<G>[H]"), "{A}<B>[C]{E}::{F}<D G>[H]");
        assert_eq!(canonical("{A}<B>[C]<D>{E}:{F}<G>[H]"), "{A}<B>[C]<D>:{E F}<G>[H]");
        assert_eq!(canonical("[a]<b>::[c]<d>::[e]"), "[a]::<b>[c]::<d>[e]");
    }

    #[test]
    fn test_lone_strands() {
        assert_eq!(canonical("<x>::[y]"), "<x>[y]");
        assert_eq!(canonical("[y]:{x}"), "[y]{x}");
        assert_eq!(canonical("[a]::<x>::[b]"), "[a]::<x>[b]");
        assert_eq!(canonical("[a]:{x}:{z}:[b]"), "[a]:{x z}[b]");
        assert_eq!(canonical("<x>::<y>"), "<x y>");
        let raw = parse("[a]::<>:[b]").unwrap();
        assert_eq!(raw.canonicalize().unwrap().to_string(), "[a]::[b]");
    }

    #[test]
    fn test_detached_strand() {
        assert!(matches!(Complex::try_from("<x>:[y]"), Err(NotationError::DetachedStrand(_))));
        assert!(matches!(Complex::try_from("[a]::{x}::[b]"), Err(NotationError::DetachedStrand(_))));
        assert!(matches!(Complex::try_from("<x>:{y}"), Err(NotationError::DetachedStrand(_))));
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse("<>").unwrap().canonicalize(), Err(NotationError::EmptyComplex));
        let raw = Complex::from_parts(vec![crate::Gate::default().into()], vec![]);
        assert!(matches!(raw.canonicalize(), Err(NotationError::EmptyDuplex(_))));
    }

    #[test]
    fn test_idempotence() {
        for text in [
            "{A}<B>[C]<D>{E}::{F}<G>[H]",
            "{t^*}[x t^]:[b t^]:[a t^]:[a]",
            "<x>::[y]:[z]::<w>",
            "{L'}<L>[S1]<S R2>:<L1>[S S2]<R>{R'}",
        ] {
            let once = Complex::try_from(text).unwrap();
            assert_eq!(once.clone().canonicalize().unwrap(), once);
            assert_eq!(Complex::try_from(once.to_string().as_str()).unwrap(), once);
        }
    }
}
