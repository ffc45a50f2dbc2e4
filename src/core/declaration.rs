//! core::declaration
//!
//! Dependency declaration expressions and their normalization.
//!
//! # Shape
//!
//! A declaration is a tree of clauses. A clause may nest further clauses
//! under `mustDeps`, reference another stem via `block` plus optional
//! naming facets, expand a parameterization (`mods`, `elems`, `elemMods`),
//! or mark itself as contributing nothing (`tech`, `noDeps`).
//!
//! Field names mirror the external JSON format (`mustDeps`, `elemMods`,
//! `noDeps`, `mod`). Unknown fields are tolerated; a clause with no usable
//! content simply contributes nothing.
//!
//! # Normalization
//!
//! [`normalize`] evaluates a clause tree into a flat set of stem
//! identifiers by depth-first flattening. Duplicates collapse only at the
//! final set construction; empty generated identifiers are discarded.
//!
//! # Example
//!
//! ```
//! use stemflow::core::declaration::{normalize, DeclarationExpr};
//!
//! let decl: DeclarationExpr = serde_json::from_str(
//!     r#"{ "mustDeps": [ { "block": "base" }, { "block": "grid", "elems": ["row", "cell"] } ] }"#,
//! )
//! .unwrap();
//!
//! let deps: Vec<String> = normalize(&decl).iter().map(|s| s.to_string()).collect();
//! assert_eq!(deps, ["base", "grid__cell", "grid__row"]);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::types::StemId;

/// A modifier parameterization value.
///
/// Mirrors the external format: `true` means the bare modifier, a scalar
/// names one value, a list names several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModValue {
    /// Bare modifier, no value.
    Flag(bool),
    /// A single named value.
    Scalar(String),
    /// Several named values.
    Many(Vec<String>),
}

/// Modifier parameterization: either a plain list of modifier names or a
/// mapping from modifier name to value(s).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mods {
    /// `"mods": ["theme", "size"]`
    Names(Vec<String>),
    /// `"mods": { "theme": "dark", "size": ["s", "m"] }`
    Values(BTreeMap<String, ModValue>),
}

/// One clause of a dependency declaration.
///
/// All fields are optional; serde fills absent fields with `None`. Maps
/// deserialize into `BTreeMap` so expansion order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeclarationExpr {
    /// Nested clauses that must all hold; flattened recursively.
    pub must_deps: Option<Vec<DeclarationExpr>>,

    /// The referenced base entity.
    pub block: Option<String>,

    /// Modifier name appended to the reference.
    #[serde(rename = "mod")]
    pub modifier: Option<String>,

    /// Modifier value; only meaningful together with `mod`.
    pub val: Option<String>,

    /// Sub-entity appended to the reference.
    pub elem: Option<String>,

    /// Sub-entity modifier expansion for the built reference.
    pub elem_mods: Option<BTreeMap<String, ModValue>>,

    /// Modifier parameterization over the base entity.
    pub mods: Option<Mods>,

    /// Sub-entity parameterization over the base entity.
    pub elems: Option<Vec<String>>,

    /// Technology-only marker; the clause contributes nothing.
    pub tech: Option<bool>,

    /// Explicit no-dependencies marker; the clause contributes nothing.
    pub no_deps: Option<bool>,
}

/// Normalize a declaration clause tree into a flat dependency set.
///
/// Pure function, no I/O. Malformed clauses (e.g. a missing `block`)
/// contribute nothing rather than failing; declaration syntax errors are a
/// caller concern.
pub fn normalize(declaration: &DeclarationExpr) -> BTreeSet<StemId> {
    let mut flat = Vec::new();
    collect(declaration, &mut flat);
    flat.into_iter().collect()
}

/// Normalize a batch of per-stem declarations, merging multiple batches by
/// per-stem set union (declarations for the same stem accumulate, never
/// overwrite).
pub fn normalize_batches<'a>(
    batches: impl IntoIterator<Item = &'a BTreeMap<StemId, DeclarationExpr>>,
) -> BTreeMap<StemId, BTreeSet<StemId>> {
    let mut merged: BTreeMap<StemId, BTreeSet<StemId>> = BTreeMap::new();
    for batch in batches {
        for (stem, declaration) in batch {
            merged
                .entry(stem.clone())
                .or_default()
                .extend(normalize(declaration));
        }
    }
    merged
}

/// Depth-first flattening of one clause into `out`.
fn collect(clause: &DeclarationExpr, out: &mut Vec<StemId>) {
    if clause.tech == Some(true) || clause.no_deps == Some(true) {
        return;
    }

    if let Some(nested) = &clause.must_deps {
        for dep in nested {
            collect(dep, out);
        }
    }

    let Some(block) = non_empty(clause.block.as_deref()) else {
        return;
    };

    let parameterized = clause.mods.is_some() || clause.elems.is_some();

    match &clause.mods {
        Some(Mods::Names(names)) => {
            for name in names {
                if !name.is_empty() {
                    emit(&format!("{block}_{name}"), out);
                }
            }
        }
        Some(Mods::Values(values)) => {
            for (name, value) in values {
                expand_modifier(block, name, value, out);
            }
        }
        None => {}
    }

    if let Some(elems) = &clause.elems {
        for elem in elems {
            if !elem.is_empty() {
                emit(&format!("{block}__{elem}"), out);
            }
        }
    }

    if parameterized {
        return;
    }

    // Unparameterized reference: build one identifier by successive
    // concatenation, then expand sub-entity modifiers against it.
    let mut id = block.to_string();
    if let Some(name) = non_empty(clause.modifier.as_deref()) {
        id.push('_');
        id.push_str(name);
        if let Some(value) = non_empty(clause.val.as_deref()) {
            id.push('_');
            id.push_str(value);
        }
    }
    if let Some(elem) = non_empty(clause.elem.as_deref()) {
        id.push_str("__");
        id.push_str(elem);
    }
    emit(&id, out);

    if let Some(elem_mods) = &clause.elem_mods {
        for (name, value) in elem_mods {
            expand_modifier(&id, name, value, out);
        }
    }
}

/// Expand one modifier name/value pair against a base identifier.
///
/// A scalar value emits both the value-specific and the bare-modifier
/// identifiers: both forms are independently buildable targets.
fn expand_modifier(base: &str, name: &str, value: &ModValue, out: &mut Vec<StemId>) {
    if name.is_empty() {
        return;
    }
    let bare = format!("{base}_{name}");
    match value {
        ModValue::Flag(_) => emit(&bare, out),
        ModValue::Scalar(v) => {
            if !v.is_empty() {
                emit(&format!("{bare}_{v}"), out);
            }
            emit(&bare, out);
        }
        ModValue::Many(values) => {
            for v in values {
                if !v.is_empty() {
                    emit(&format!("{bare}_{v}"), out);
                }
            }
        }
    }
}

fn emit(id: &str, out: &mut Vec<StemId>) {
    if let Ok(stem) = StemId::new(id) {
        out.push(stem);
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(json: &str) -> DeclarationExpr {
        serde_json::from_str(json).unwrap()
    }

    fn names(set: &BTreeSet<StemId>) -> Vec<String> {
        set.iter().map(|s| s.to_string()).collect()
    }

    mod decoding {
        use super::*;

        #[test]
        fn external_field_names() {
            let clause = decl(
                r#"{
                    "block": "b",
                    "mod": "m",
                    "val": "v",
                    "elem": "e",
                    "elemMods": { "x": true },
                    "noDeps": false
                }"#,
            );
            assert_eq!(clause.block.as_deref(), Some("b"));
            assert_eq!(clause.modifier.as_deref(), Some("m"));
            assert_eq!(clause.val.as_deref(), Some("v"));
            assert_eq!(clause.elem.as_deref(), Some("e"));
            assert!(clause.elem_mods.is_some());
            assert_eq!(clause.no_deps, Some(false));
        }

        #[test]
        fn mods_accepts_list_and_map() {
            let list = decl(r#"{ "block": "b", "mods": ["m1", "m2"] }"#);
            assert!(matches!(list.mods, Some(Mods::Names(_))));

            let map = decl(r#"{ "block": "b", "mods": { "m": ["a", "b"] } }"#);
            assert!(matches!(map.mods, Some(Mods::Values(_))));
        }

        #[test]
        fn empty_object_is_inert() {
            let clause = decl("{}");
            assert_eq!(clause, DeclarationExpr::default());
            assert!(normalize(&clause).is_empty());
        }
    }

    mod flattening {
        use super::*;

        #[test]
        fn plain_reference() {
            let clause = decl(r#"{ "block": "base" }"#);
            assert_eq!(names(&normalize(&clause)), ["base"]);
        }

        #[test]
        fn must_deps_flatten_recursively() {
            let clause = decl(
                r#"{ "mustDeps": [
                    { "block": "a" },
                    { "mustDeps": [ { "block": "b" }, { "block": "c" } ] }
                ] }"#,
            );
            assert_eq!(names(&normalize(&clause)), ["a", "b", "c"]);
        }

        #[test]
        fn duplicates_collapse_in_final_set() {
            let clause = decl(
                r#"{ "mustDeps": [ { "block": "a" }, { "block": "a" }, { "block": "b" } ] }"#,
            );
            assert_eq!(names(&normalize(&clause)), ["a", "b"]);
        }

        #[test]
        fn missing_block_contributes_nothing() {
            let clause = decl(r#"{ "mod": "m", "val": "v" }"#);
            assert!(normalize(&clause).is_empty());
        }

        #[test]
        fn empty_block_contributes_nothing() {
            let clause = decl(r#"{ "block": "" }"#);
            assert!(normalize(&clause).is_empty());
        }
    }

    mod markers {
        use super::*;

        #[test]
        fn tech_clause_contributes_nothing() {
            let clause = decl(r#"{ "block": "b", "tech": true }"#);
            assert!(normalize(&clause).is_empty());
        }

        #[test]
        fn no_deps_clause_contributes_nothing() {
            let clause = decl(r#"{ "block": "b", "noDeps": true }"#);
            assert!(normalize(&clause).is_empty());
        }

        #[test]
        fn marker_suppresses_nested_clauses() {
            let clause = decl(r#"{ "tech": true, "mustDeps": [ { "block": "a" } ] }"#);
            assert!(normalize(&clause).is_empty());
        }
    }

    mod parameterization {
        use super::*;

        #[test]
        fn mod_name_list() {
            let clause = decl(r#"{ "block": "b", "mods": ["m1", "m2"] }"#);
            assert_eq!(names(&normalize(&clause)), ["b_m1", "b_m2"]);
        }

        #[test]
        fn mod_value_list() {
            let clause = decl(r#"{ "block": "b", "mods": { "m": ["x", "y"] } }"#);
            assert_eq!(names(&normalize(&clause)), ["b_m_x", "b_m_y"]);
        }

        #[test]
        fn mod_boolean_emits_bare_modifier() {
            let clause = decl(r#"{ "block": "b", "mods": { "m": true } }"#);
            assert_eq!(names(&normalize(&clause)), ["b_m"]);
        }

        #[test]
        fn mod_scalar_emits_both_forms() {
            // The value-specific and the bare-modifier identifiers are both
            // independently buildable targets.
            let clause = decl(r#"{ "block": "b", "mods": { "m": "v" } }"#);
            assert_eq!(names(&normalize(&clause)), ["b_m", "b_m_v"]);
        }

        #[test]
        fn elems_list() {
            let clause = decl(r#"{ "block": "b", "elems": ["e1", "e2"] }"#);
            assert_eq!(names(&normalize(&clause)), ["b__e1", "b__e2"]);
        }

        #[test]
        fn parameterized_reference_skips_bare_block() {
            let clause = decl(r#"{ "block": "b", "mods": ["m"] }"#);
            assert!(!normalize(&clause).contains(&StemId::new("b").unwrap()));
        }
    }

    mod concatenation {
        use super::*;

        #[test]
        fn successive_facets() {
            let clause = decl(r#"{ "block": "b", "mod": "m", "val": "v", "elem": "e" }"#);
            assert_eq!(names(&normalize(&clause)), ["b_m_v__e"]);
        }

        #[test]
        fn val_without_mod_is_ignored() {
            let clause = decl(r#"{ "block": "b", "val": "v" }"#);
            assert_eq!(names(&normalize(&clause)), ["b"]);
        }

        #[test]
        fn elem_mods_expand_against_built_reference() {
            let clause = decl(r#"{ "block": "b", "elem": "e", "elemMods": { "m": true } }"#);
            assert_eq!(names(&normalize(&clause)), ["b__e", "b__e_m"]);
        }

        #[test]
        fn elem_mods_scalar_emits_both_forms() {
            let clause = decl(r#"{ "block": "b", "elem": "e", "elemMods": { "m": "v" } }"#);
            assert_eq!(names(&normalize(&clause)), ["b__e", "b__e_m", "b__e_m_v"]);
        }

        #[test]
        fn elem_mods_list_values() {
            let clause = decl(r#"{ "block": "b", "elem": "e", "elemMods": { "m": ["x", "y"] } }"#);
            assert_eq!(
                names(&normalize(&clause)),
                ["b__e", "b__e_m", "b__e_m_x", "b__e_m_y"]
            );
        }
    }

    mod batches {
        use super::*;

        #[test]
        fn same_stem_merges_by_union() {
            let stem = StemId::new("a").unwrap();
            let mut first = BTreeMap::new();
            first.insert(stem.clone(), decl(r#"{ "mustDeps": [ { "block": "b" } ] }"#));
            let mut second = BTreeMap::new();
            second.insert(stem.clone(), decl(r#"{ "mustDeps": [ { "block": "c" } ] }"#));

            let merged = normalize_batches([&first, &second]);
            assert_eq!(names(&merged[&stem]), ["b", "c"]);
        }

        #[test]
        fn distinct_stems_stay_separate() {
            let mut batch = BTreeMap::new();
            batch.insert(StemId::new("a").unwrap(), decl(r#"{ "block": "x" }"#));
            batch.insert(StemId::new("b").unwrap(), decl(r#"{ "block": "y" }"#));

            let merged = normalize_batches([&batch]);
            assert_eq!(merged.len(), 2);
        }
    }
}
