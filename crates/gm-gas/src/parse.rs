//! Text parsers for gas mixtures.
//!
//! Two input shapes are supported:
//!
//! - free-form lists such as `"1% hydrogen, 50 ppm acetone, air"`, where the last
//!   entry is the balance gas and its own concentration (if any) is ignored
//! - name → concentration mappings with exactly one `"balance"` entry, as found in
//!   configuration files
//!
//! Free-form entries follow `<number>[ ]<unit> <name>`; an entry that does not fit
//! is read as a bare gas name at 100 %. The name stops at the first character that is
//! not alphanumeric, `_`, `-` or whitespace, so labels like `"Hydrogen (H_2)"` resolve
//! to `"Hydrogen"`.

use std::str::FromStr;

use gm_core::units::unitless;
use gm_core::parse_concentration;

use crate::catalog::{GasRegistry, standard_registry};
use crate::component::Component;
use crate::error::{GasError, GasResult};
use crate::mixture::Mixture;

/// Sentinel concentration marking the balance gas in a mapping.
pub const BALANCE_SENTINEL: &str = "balance";

/// One comma-separated entry of a free-form gas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasToken<'a> {
    /// `<value>[ ]<unit> <name>`, e.g. `1% hydrogen` or `12 ppm Nitrogen-dioxide (NO_2)`.
    Quantified {
        value: &'a str,
        unit: &'a str,
        name: &'a str,
    },
    /// Anything else; read as a gas name at 100 %.
    Bare { name: &'a str },
}

impl<'a> GasToken<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            GasToken::Quantified { name, .. } | GasToken::Bare { name } => name,
        }
    }
}

/// Split a free-form list on commas, trimming each entry.
pub fn split_gas_list(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(',').map(str::trim)
}

/// Classify one list entry.
pub fn parse_token(entry: &str) -> GasToken<'_> {
    quantified(entry).unwrap_or(GasToken::Bare { name: entry })
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn quantified(entry: &str) -> Option<GasToken<'_>> {
    // number: digits, optionally followed by '.' and more digits
    let int_len = leading(entry, |c| c.is_ascii_digit());
    if int_len == 0 {
        return None;
    }
    let mut num_len = int_len;
    if entry[num_len..].starts_with('.') {
        num_len += 1;
        num_len += leading(&entry[num_len..], |c| c.is_ascii_digit());
    }
    let value = &entry[..num_len];
    let mut rest = &entry[num_len..];

    // at most one whitespace between number and unit
    if let Some(c) = rest.chars().next().filter(|c| c.is_whitespace()) {
        rest = &rest[c.len_utf8()..];
    }

    let unit_len = leading(rest, |c| is_word(c) || c == '%');
    if unit_len == 0 {
        return None;
    }
    let unit = &rest[..unit_len];
    rest = &rest[unit_len..];

    let gap = leading(rest, char::is_whitespace);
    if gap == 0 {
        return None;
    }
    rest = &rest[gap..];

    let name_len = leading(rest, |c| is_word(c) || c.is_whitespace() || c == '-');
    let name = rest[..name_len].trim();
    if name.is_empty() {
        return None;
    }

    Some(GasToken::Quantified { value, unit, name })
}

/// Byte length of the longest prefix whose chars all satisfy `pred`.
fn leading(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.find(|c: char| !pred(c)).unwrap_or(s.len())
}

impl Mixture {
    /// Parse a free-form list such as `"1% hydrogen, air"` against `registry`.
    ///
    /// The last entry names the balance gas; its concentration is recomputed from the
    /// preceding entries.
    pub fn parse(text: &str, registry: &GasRegistry) -> GasResult<Self> {
        if text.trim().is_empty() {
            return Err(GasError::InvalidSpec {
                what: "empty gas list".to_string(),
            });
        }

        let mut gases = Vec::new();
        for fragment in split_gas_list(text) {
            let token = parse_token(fragment);
            tracing::trace!(?token, "gas list entry");

            let quantity = match token {
                GasToken::Quantified { value, unit, .. } => {
                    parse_concentration(&format!("{} {}", value, unit))?
                }
                GasToken::Bare { .. } => unitless(1.0),
            };

            let name = token.name();
            let properties = registry
                .get(name)
                .cloned()
                .ok_or_else(|| GasError::UnknownGas {
                    name: name.to_string(),
                    fragment: fragment.to_string(),
                })?;

            gases.push(Component::new(quantity, properties)?);
        }

        let balance = gases.pop().ok_or_else(|| GasError::InvalidSpec {
            what: "no balance gas in list".to_string(),
        })?;

        tracing::debug!(
            input = text,
            components = gases.len(),
            balance = balance.properties().name(),
            "parsed gas list"
        );

        Self::auto_balance(gases, balance.properties().clone())
    }

    /// Build a mixture from `(gas name, concentration)` pairs.
    ///
    /// Exactly one entry must be the balance, marked by a `None` concentration or the
    /// case-insensitive text `"balance"`.
    pub fn from_mapping<I, N, C>(entries: I, registry: &GasRegistry) -> GasResult<Self>
    where
        I: IntoIterator<Item = (N, Option<C>)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut balance = None;
        let mut components = Vec::new();

        for (name, concentration) in entries {
            let properties = registry.lookup(name.as_ref())?;

            let concentration = concentration
                .filter(|c| !c.as_ref().trim().eq_ignore_ascii_case(BALANCE_SENTINEL));

            match concentration {
                Some(text) => components.push(Component::parse(text.as_ref(), properties)?),
                None if balance.is_some() => {
                    return Err(GasError::InvalidSpec {
                        what: "multiple balance gases specified".to_string(),
                    });
                }
                None => balance = Some(properties),
            }
        }

        let balance = balance.ok_or_else(|| GasError::InvalidSpec {
            what: "balance gas not specified in mixture".to_string(),
        })?;

        tracing::debug!(
            components = components.len(),
            balance = balance.name(),
            "parsed gas mapping"
        );

        Self::auto_balance(components, balance)
    }
}

impl FromStr for Mixture {
    type Err = GasError;

    /// Parse against the shared standard registry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, standard_registry())
    }
}
