//! engine::listing
//!
//! Deterministic text rendering of `name:amount` lists.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::types::PartName;

/// Separator between two `name:amount` entries.
pub const ENTRY_SEPARATOR: &str = ";";

/// Separator between a name and its amount.
pub const AMOUNT_SEPARATOR: &str = ":";

/// Rendered in place of a listing when the queried part is a component.
pub const COMPONENT_MARKER: &str = "COMPONENT";

/// Rendered in place of an aggregation that found nothing.
pub const EMPTY_MARKER: &str = "EMPTY";

/// An ordered list of parts with amounts.
///
/// Displays as `name:amount` entries joined by `;`, or `EMPTY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    entries: Vec<(PartName, u64)>,
}

impl Listing {
    /// Entries in ascending name order.
    pub fn by_name(amounts: &BTreeMap<PartName, u64>) -> Self {
        Self {
            entries: amounts
                .iter()
                .map(|(name, &amount)| (name.clone(), amount))
                .collect(),
        }
    }

    /// Entries by descending amount, ties broken by ascending name.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use blueprintz::core::types::PartName;
    /// use blueprintz::engine::listing::Listing;
    ///
    /// let n = |s: &str| PartName::new(s).unwrap();
    /// let amounts = BTreeMap::from([(n("Frame"), 1), (n("Spoke"), 64), (n("Bell"), 1)]);
    /// assert_eq!(Listing::by_amount(amounts).to_string(), "Spoke:64;Bell:1;Frame:1");
    /// ```
    pub fn by_amount(amounts: BTreeMap<PartName, u64>) -> Self {
        let mut entries: Vec<_> = amounts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self { entries }
    }

    /// Whether the listing has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(EMPTY_MARKER);
        }

        for (i, (name, amount)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(ENTRY_SEPARATOR)?;
            }
            write!(f, "{name}{AMOUNT_SEPARATOR}{amount}")?;
        }
        Ok(())
    }
}
