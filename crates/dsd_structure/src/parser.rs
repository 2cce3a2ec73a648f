//! Reading the complex notation.
//!
//! ```text
//! complex := segment ((":" | "::") segment)*
//! segment := lower? upper? duplex upper? lower?  |  upper  |  lower
//! ```
//!
//! The parser is a single left to right scan. It does not canonicalize.

use crate::Complex;
use crate::Connector;
use crate::Domain;
use crate::Gate;
use crate::NotationError;
use crate::Segment;
use crate::Strand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Upper,
    Lower,
    Duplex,
}

impl Group {
    fn open(c: char) -> Option<Group> {
        match c {
            '<' => Some(Group::Upper),
            '{' => Some(Group::Lower),
            '[' => Some(Group::Duplex),
            _ => None,
        }
    }

    fn close(self) -> char {
        match self {
            Group::Upper => '>',
            Group::Lower => '}',
            Group::Duplex => ']',
        }
    }
}

/// Slot order within a gate: `{ll}<ul>[duplex]<ur>{lr}`.
const SLOTS: [Group; 5] = [Group::Lower, Group::Upper, Group::Duplex, Group::Upper, Group::Lower];

/// Parse raw notation into a (non-canonical) complex.
pub fn parse(text: &str) -> Result<Complex, NotationError> {
    let err = |reason: &str| NotationError::malformed(text, reason);

    let mut segments = Vec::new();
    let mut connectors = Vec::new();
    let mut groups: Vec<(Group, Vec<Domain>)> = Vec::new();

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if c == ':' {
            let connector = if chars.peek() == Some(&':') {
                chars.next();
                Connector::Upper
            } else {
                Connector::Lower
            };
            if chars.peek() == Some(&':') {
                return Err(err("unknown connector"));
            }
            segments.push(segment(text, std::mem::take(&mut groups))?);
            connectors.push(connector);
            continue;
        }
        let Some(group) = Group::open(c) else {
            return Err(err(&format!("unexpected character '{c}'")));
        };
        let mut body = String::new();
        loop {
            match chars.next() {
                None => return Err(err("unbalanced brackets")),
                Some(c) if c == group.close() => break,
                Some(c) if c == ':' || "<>{}[]".contains(c) => {
                    return Err(err(&format!("unexpected '{c}' inside brackets")));
                }
                Some(c) => body.push(c),
            }
        }
        let domains = body
            .split_whitespace()
            .map(Domain::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        if group == Group::Duplex && domains.is_empty() {
            return Err(err("empty duplex"));
        }
        groups.push((group, domains));
    }
    segments.push(segment(text, groups)?);

    Ok(Complex::from_parts(segments, connectors))
}

fn segment(text: &str, groups: Vec<(Group, Vec<Domain>)>) -> Result<Segment, NotationError> {
    let err = |reason: &str| NotationError::malformed(text, reason);

    if groups.is_empty() {
        return Err(err("empty segment"));
    }
    let duplexes = groups.iter().filter(|(g, _)| *g == Group::Duplex).count();
    if duplexes == 0 {
        let mut groups = groups;
        return match (groups.pop(), groups.is_empty()) {
            (Some((Group::Upper, d)), true) => Ok(Strand::upper(d).into()),
            (Some((Group::Lower, d)), true) => Ok(Strand::lower(d).into()),
            _ => Err(err("strand segment must hold exactly one strand")),
        };
    }
    if duplexes > 1 {
        return Err(err("more than one duplex in a gate"));
    }

    let mut slots: [Vec<Domain>; 5] = Default::default();
    let mut cursor = 0;
    for (group, domains) in groups {
        let Some(slot) = (cursor..SLOTS.len()).find(|&i| SLOTS[i] == group) else {
            return Err(err("overhangs out of order"));
        };
        slots[slot] = domains;
        cursor = slot + 1;
    }
    let [lower_left, upper_left, duplex, upper_right, lower_right] = slots;
    Ok(Gate { lower_left, upper_left, duplex, upper_right, lower_right }.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gate() {
        let c = parse("{L'}<L>[S1]<S R2>:<L1>[S S2]<R>{R'}").unwrap();
        assert_eq!(c.segments().len(), 2);
        assert_eq!(c.connectors(), &[Connector::Lower]);
        let Segment::Gate(g) = &c.segments()[1] else { panic!("gate expected") };
        assert_eq!(g.upper_left, vec![Domain::long("L1")]);
        assert_eq!(g.duplex.len(), 2);
        assert_eq!(g.lower_right, vec![Domain::long("R'")]);
    }

    #[test]
    fn test_parse_single_overhangs() {
        // A lone upper group after the duplex is the right-upper overhang.
        let c = parse("[a]<b>").unwrap();
        let Segment::Gate(g) = &c.segments()[0] else { panic!("gate expected") };
        assert_eq!(g.upper_right, vec![Domain::long("b")]);
        assert!(g.upper_left.is_empty());

        let c = parse("{t^*}[x t^]").unwrap();
        let Segment::Gate(g) = &c.segments()[0] else { panic!("gate expected") };
        assert_eq!(g.lower_left, vec![Domain::new("t", true, true)]);
    }

    #[test]
    fn test_parse_strands_and_connectors() {
        let c = parse("<x>::[y] : {z}").unwrap();
        assert_eq!(c.connectors(), &[Connector::Upper, Connector::Lower]);
        assert_eq!(c.to_string(), "<x>::[y]:{z}");
        assert!(parse("<L N^ R>").unwrap().is_strand());
    }

    #[test]
    fn test_parse_errors() {
        for text in [
            "",
            "[a",
            "<a]",
            "[a<b>]",
            "[]",
            "[a]:::[b]",
            "[a]::",
            ":[a]",
            "[a][b]",
            "<a><b>",
            "<a>[b]{c}<d>",
            "[b]<c>{d}<e>",
            "(a)",
            "[a b*^]",
            "[a]x",
        ] {
            assert!(
                matches!(parse(text), Err(NotationError::MalformedNotation { .. })),
                "{text} should not parse"
            );
        }
    }
}
