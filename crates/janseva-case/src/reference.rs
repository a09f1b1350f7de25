//! # Reference Number Generator
//!
//! Produces the human-readable identifier assigned once at case creation:
//! `{KindPrefix}-{TypeAbbrev}-{YYYYMMDD}-{4 random digits}`.
//!
//! Two inherited quirks are kept deliberately rather than unified:
//! certificates carry no type abbreviation, and scheme applications carry
//! no kind prefix at all — their reference opens with the scheme-name
//! abbreviation.
//!
//! The generator checks nothing against the store; the date plus a
//! 4-digit random suffix makes same-day collisions possible but rare.
//! The service layer pairs it with a store uniqueness constraint and a
//! bounded retry.

use rand::Rng;

use janseva_core::Timestamp;

use crate::error::CaseError;
use crate::kind::CaseKind;
use crate::policy::KindPolicy;

/// Number of decimal digits in the random suffix.
const SUFFIX_DIGITS: u32 = 4;

/// Generate a reference number for a case of the given kind.
///
/// `discriminator` is the kind's domain discriminator (disaster type,
/// dispute type, service type, scheme name); it is required for every
/// kind except [`CaseKind::Certificate`].
///
/// # Errors
///
/// Returns [`CaseError::Validation`] when the kind expects a
/// discriminator and none (or a blank one) is supplied.
pub fn generate<R: Rng + ?Sized>(
    kind: CaseKind,
    discriminator: Option<&str>,
    on: Timestamp,
    rng: &mut R,
) -> Result<String, CaseError> {
    let policy = KindPolicy::for_kind(kind);

    let mut parts: Vec<String> = Vec::with_capacity(4);
    if let Some(prefix) = policy.reference_prefix {
        parts.push(prefix.to_string());
    }
    if let Some(field) = policy.discriminator_field {
        let abbrev = type_abbrev(discriminator.unwrap_or("")).ok_or_else(|| {
            CaseError::Validation(format!("{kind} submissions require a {field} discriminator"))
        })?;
        parts.push(abbrev);
    }
    parts.push(on.yyyymmdd());
    parts.push(format!(
        "{:0width$}",
        rng.gen_range(0..10u32.pow(SUFFIX_DIGITS)),
        width = SUFFIX_DIGITS as usize
    ));

    Ok(parts.join("-"))
}

/// The first three non-space characters of the discriminator, upper-cased.
fn type_abbrev(discriminator: &str) -> Option<String> {
    let abbrev: String = discriminator
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(3)
        .collect::<String>()
        .to_uppercase();
    if abbrev.is_empty() {
        None
    } else {
        Some(abbrev)
    }
}
