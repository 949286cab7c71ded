//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`PartName`] - Opaque, non-empty part identifier
//! - [`Quantity`] - Amount accepted from a command (1..=1000)
//! - [`PartKind`] - Assembly or component, always derived from children
//! - [`Fingerprint`] - Graph state hash for change detection
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use blueprintz::core::types::{PartName, Quantity};
//!
//! // Valid constructions
//! let wheel = PartName::new("Wheel").unwrap();
//! let two = Quantity::new(2).unwrap();
//! assert_eq!(wheel.as_str(), "Wheel");
//! assert_eq!(two.get(), 2);
//!
//! // Invalid constructions fail at creation time
//! assert!(PartName::new("").is_err());
//! assert!(Quantity::new(0).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Smallest amount a command may carry.
pub const MIN_QUANTITY: u32 = 1;

/// Largest amount a command may carry.
pub const MAX_QUANTITY: u32 = 1000;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid part name: {0}")]
    InvalidPartName(String),

    #[error("number {0} is not in range {MIN_QUANTITY}..={MAX_QUANTITY}")]
    QuantityOutOfRange(u64),
}

/// A part identifier.
///
/// The graph treats names as opaque: any non-empty string is accepted, with
/// no case folding and no trimming. Which names a user may type is decided
/// by the command syntax, not here.
///
/// # Example
///
/// ```
/// use blueprintz::core::types::PartName;
///
/// let name = PartName::new("Frame").unwrap();
/// assert_eq!(name.to_string(), "Frame");
///
/// assert!(PartName::new("").is_err());
/// assert!(PartName::new("front wheel").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartName(String);

impl PartName {
    /// Create a new part name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidPartName` if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidPartName(
                "part name cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Get the part name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PartName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PartName> for String {
    fn from(name: PartName) -> Self {
        name.0
    }
}

impl AsRef<str> for PartName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An amount carried by a command, between [`MIN_QUANTITY`] and
/// [`MAX_QUANTITY`] inclusive.
///
/// Stored multiplicities may grow past the maximum by repeated additions;
/// only the amount of a single request is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Quantity(u32);

impl Quantity {
    /// Create a quantity, rejecting values outside `1..=1000`.
    pub fn new(value: u64) -> Result<Self, TypeError> {
        match u32::try_from(value) {
            Ok(v) if (MIN_QUANTITY..=MAX_QUANTITY).contains(&v) => Ok(Self(v)),
            _ => Err(TypeError::QuantityOutOfRange(value)),
        }
    }

    /// The amount as a plain integer.
    pub fn get(self) -> u64 {
        u64::from(self.0)
    }
}

impl TryFrom<u64> for Quantity {
    type Error = TypeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u64 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a part.
///
/// Never stored: always computed from whether the part has children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    /// A part made of one or more other parts.
    Assembly,
    /// A leaf part.
    Component,
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartKind::Assembly => f.write_str("ASSEMBLY"),
            PartKind::Component => f.write_str("COMPONENT"),
        }
    }
}

/// Hash of a graph's complete state.
///
/// Two graphs with the same parts and the same weighted edges have the same
/// fingerprint regardless of the order anything was inserted in.
///
/// # Example
///
/// ```
/// use blueprintz::core::types::{Fingerprint, PartName};
///
/// let bike = PartName::new("Bike").unwrap();
/// let wheel = PartName::new("Wheel").unwrap();
///
/// let a = Fingerprint::compute([(&bike, Some((&wheel, 2)))]);
/// let b = Fingerprint::compute([(&bike, Some((&wheel, 2)))]);
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute a fingerprint from `(part, edge)` records.
    ///
    /// Each part contributes one record per child edge, or a single record
    /// with `None` when it has no children. Records are sorted before
    /// hashing. Names are length-prefixed, so no name can forge a record
    /// boundary.
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = (&'a PartName, Option<(&'a PartName, u64)>)>,
    {
        let mut sorted: Vec<_> = records.into_iter().collect();
        sorted.sort();

        let mut hasher = Sha256::new();
        for (part, edge) in sorted {
            update_name(&mut hasher, part);
            match edge {
                Some((child, amount)) => {
                    hasher.update([1u8]);
                    update_name(&mut hasher, child);
                    hasher.update(amount.to_be_bytes());
                }
                None => hasher.update([0u8]),
            }
        }

        Self(hex::encode(hasher.finalize()))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for diagnostics.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

fn update_name(hasher: &mut Sha256, name: &PartName) {
    let bytes = name.as_str().as_bytes();
    hasher.update((bytes.len() as u64).to_be_bytes());
    hasher.update(bytes);
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
