//! Complex notation for DNA strand displacement systems.
//!
//! A complex is written as gates joined by connectors, e.g.
//! `{L'}<L>[S1]<S R2>:<L1>[S S2]<R>{R'}`, or as a single free strand such
//! as `<L N^ R>`. [`Complex::try_from`] tidies, parses and canonicalizes,
//! so two complexes compare equal iff they describe the same structure in
//! the same orientation.

mod error;
mod domain;
mod strand;
mod gate;
mod complex;
mod parser;
mod canonical;

pub use error::*;
pub use domain::*;
pub use strand::*;
pub use gate::*;
pub use complex::*;
pub use parser::*;
pub use canonical::*;
