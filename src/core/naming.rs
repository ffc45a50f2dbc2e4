//! core::naming
//!
//! Stem naming grammar: parsing, validation, and ancestor decomposition.
//!
//! # Grammar
//!
//! ```text
//! stem := base [ "_" modName [ "_" modVal ] ] [ "__" subEntity [ "_" subModName [ "_" subModVal ] ] ]
//! ```
//!
//! Each facet is a non-empty run of `[A-Za-z0-9-]`. A dangling or doubled
//! separator, a second `__`, or more than three `_`-separated segments on
//! either side of the `__` is malformed.
//!
//! # Ancestor Chain
//!
//! A compound identifier structurally depends on its simpler ancestors.
//! Stripping the most specific populated facet one step at a time, in the
//! fixed order sub-modifier-value, sub-modifier-name, sub-entity,
//! modifier-value, modifier-name, yields the chain down to the bare base.
//!
//! # Examples
//!
//! ```
//! use stemflow::core::naming::parse;
//!
//! let record = parse("button__icon_size_large").unwrap();
//! assert_eq!(record.base(), "button");
//! assert_eq!(record.sub_entity(), Some("icon"));
//!
//! let chain: Vec<String> = record
//!     .ancestor_chain()
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! assert_eq!(chain, ["button__icon_size", "button__icon", "button"]);
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::core::types::StemId;

/// Separator between the entity part and the sub-entity part.
const SUB_SEP: &str = "__";

/// Separator between facets within one part.
const FACET_SEP: char = '_';

/// Errors from stem identifier parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    /// The identifier violates the naming grammar.
    #[error("malformed stem identifier: '{0}'")]
    Malformed(String),
}

/// Structured decomposition of a stem identifier.
///
/// Invariants, enforced by [`parse`] being the only constructor:
///
/// - `base` is always non-empty
/// - a value facet is only present when its name facet is present
/// - sub-modifier facets are only present when the sub-entity is present
///
/// Records are immutable values; facet stripping produces new records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamingRecord {
    base: String,
    modifier_name: Option<String>,
    modifier_value: Option<String>,
    sub_entity: Option<String>,
    sub_modifier_name: Option<String>,
    sub_modifier_value: Option<String>,
}

/// Parse a stem identifier into a naming record.
///
/// # Errors
///
/// Returns `NamingError::Malformed` if the identifier violates the grammar.
///
/// # Example
///
/// ```
/// use stemflow::core::naming::parse;
///
/// assert!(parse("block").is_ok());
/// assert!(parse("block_mod_val").is_ok());
/// assert!(parse("block__elem").is_ok());
///
/// // Dangling and doubled separators are malformed
/// assert!(parse("block_").is_err());
/// assert!(parse("block___elem").is_err());
/// assert!(parse("block__elem__extra").is_err());
/// ```
pub fn parse(stem: &str) -> Result<NamingRecord, NamingError> {
    let malformed = || NamingError::Malformed(stem.to_string());

    let (entity_part, sub_part) = match stem.split_once(SUB_SEP) {
        Some((entity, sub)) => (entity, Some(sub)),
        None => (stem, None),
    };

    // At most one sub-entity separator.
    if let Some(sub) = sub_part {
        if sub.contains(SUB_SEP) {
            return Err(malformed());
        }
    }

    let entity = split_facets(entity_part).ok_or_else(malformed)?;
    let mut record = NamingRecord {
        base: entity[0].to_string(),
        modifier_name: entity.get(1).map(|s| s.to_string()),
        modifier_value: entity.get(2).map(|s| s.to_string()),
        sub_entity: None,
        sub_modifier_name: None,
        sub_modifier_value: None,
    };

    if let Some(sub) = sub_part {
        let sub = split_facets(sub).ok_or_else(malformed)?;
        record.sub_entity = Some(sub[0].to_string());
        record.sub_modifier_name = sub.get(1).map(|s| s.to_string());
        record.sub_modifier_value = sub.get(2).map(|s| s.to_string());
    }

    Ok(record)
}

/// Split a `_`-separated facet group into one to three validated segments.
///
/// Returns `None` if any segment is empty, carries a character outside
/// `[A-Za-z0-9-]`, or there are more than three segments.
fn split_facets(part: &str) -> Option<Vec<&str>> {
    let segments: Vec<&str> = part.split(FACET_SEP).collect();
    if segments.len() > 3 {
        return None;
    }
    for segment in &segments {
        if segment.is_empty() {
            return None;
        }
        if !segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return None;
        }
    }
    Some(segments)
}

impl NamingRecord {
    /// The base entity name.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The modifier name, if present.
    pub fn modifier_name(&self) -> Option<&str> {
        self.modifier_name.as_deref()
    }

    /// The modifier value, if present.
    pub fn modifier_value(&self) -> Option<&str> {
        self.modifier_value.as_deref()
    }

    /// The sub-entity name, if present.
    pub fn sub_entity(&self) -> Option<&str> {
        self.sub_entity.as_deref()
    }

    /// The sub-entity modifier name, if present.
    pub fn sub_modifier_name(&self) -> Option<&str> {
        self.sub_modifier_name.as_deref()
    }

    /// The sub-entity modifier value, if present.
    pub fn sub_modifier_value(&self) -> Option<&str> {
        self.sub_modifier_value.as_deref()
    }

    /// True iff only the base entity is populated.
    pub fn is_entity_only(&self) -> bool {
        self.modifier_name.is_none()
            && self.modifier_value.is_none()
            && self.sub_entity.is_none()
            && self.sub_modifier_name.is_none()
            && self.sub_modifier_value.is_none()
    }

    /// Re-serialize the record into its stem identifier.
    ///
    /// This is the inverse of [`parse`]: `stem_id(parse(s)) == s` for every
    /// syntactically valid `s`.
    pub fn stem_id(&self) -> StemId {
        let mut id = self.base.clone();
        if let Some(name) = &self.modifier_name {
            id.push(FACET_SEP);
            id.push_str(name);
            if let Some(value) = &self.modifier_value {
                id.push(FACET_SEP);
                id.push_str(value);
            }
        }
        if let Some(sub) = &self.sub_entity {
            id.push_str(SUB_SEP);
            id.push_str(sub);
            if let Some(name) = &self.sub_modifier_name {
                id.push(FACET_SEP);
                id.push_str(name);
                if let Some(value) = &self.sub_modifier_value {
                    id.push(FACET_SEP);
                    id.push_str(value);
                }
            }
        }
        // Safe because records always carry a non-empty base.
        StemId::from_non_empty(id)
    }

    /// Compute the implicit ancestor chain, most specific first.
    ///
    /// Each entry structurally depends on the next; the bare base is always
    /// the final entry. An entity-only record has an empty chain.
    ///
    /// # Example
    ///
    /// ```
    /// use stemflow::core::naming::parse;
    ///
    /// let record = parse("menu_theme_dark").unwrap();
    /// let chain = record.ancestor_chain();
    /// assert_eq!(chain[0].as_str(), "menu_theme");
    /// assert_eq!(chain[1].as_str(), "menu");
    /// assert_eq!(chain.len(), 2);
    /// ```
    pub fn ancestor_chain(&self) -> Vec<StemId> {
        let mut chain = Vec::new();
        let mut current = self.clone();
        while let Some(parent) = current.strip_most_specific() {
            chain.push(parent.stem_id());
            current = parent;
        }
        chain
    }

    /// Strip the most specific populated facet, returning the next-simpler
    /// record, or `None` for an entity-only record.
    fn strip_most_specific(&self) -> Option<NamingRecord> {
        let mut next = self.clone();
        if next.sub_modifier_value.take().is_some() {
            return Some(next);
        }
        if next.sub_modifier_name.take().is_some() {
            return Some(next);
        }
        if next.sub_entity.take().is_some() {
            return Some(next);
        }
        if next.modifier_value.take().is_some() {
            return Some(next);
        }
        if next.modifier_name.take().is_some() {
            return Some(next);
        }
        None
    }
}

impl std::fmt::Display for NamingRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stem_id())
    }
}
