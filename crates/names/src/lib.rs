//! Canonical forms for guide names and registry headers.
//!
//! Registry exports and user input disagree on accents, case, spacing and on
//! whether Portuguese linking particles (`DE`, `DOS`, ...) are spelled out.
//! Everything here is pure: the same input always yields the same output and
//! nothing touches I/O or the process locale.
//!
//! * [`normalize`] produces the comparison key for a person's name.
//! * [`normalize_header`] produces the lookup key for a CSV column header.
//! * [`digits_only`] reduces a formatted registration number to its digits.
//! * [`is_loose_match`] compares two normalized names while tolerating
//!   particles configured in a [`ParticleSet`].

mod fold;
mod particles;

pub use fold::{digits_only, normalize, normalize_header};
pub use particles::{DEFAULT_PARTICLES, ParticleSet, is_loose_match};
