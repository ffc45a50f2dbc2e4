//! source
//!
//! Declaration and present-list input adapters.
//!
//! # Design
//!
//! The engine consumes two independently-preparable inputs: the set of
//! declaration batches and the ordered list of present stems. This module
//! gathers both concurrently ([`gather`] joins two async reads), but the
//! engine is never invoked until both are fully materialized; a partial
//! declaration set would silently produce an incomplete graph.
//!
//! The [`DeclSource`] trait is async because sources involve I/O. The
//! filesystem implementation lives in [`fs`].

pub mod fs;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::core::declaration::{self, DeclarationExpr};
use crate::core::types::StemId;

/// One decoded declaration file: stem name to declaration record.
pub type DeclBatch = BTreeMap<StemId, DeclarationExpr>;

/// Errors from input gathering.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading an input file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The offending path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decoding a declaration file failed.
    #[error("failed to parse declarations in {path}: {message}")]
    Parse {
        /// The offending path.
        path: PathBuf,
        /// Decoder message.
        message: String,
    },
}

/// A provider of decoded declaration batches.
#[async_trait]
pub trait DeclSource {
    /// Load every batch this source knows about.
    async fn load(&self) -> Result<Vec<DeclBatch>, SourceError>;
}

/// The two engine inputs, fully materialized.
#[derive(Debug)]
pub struct Inputs {
    /// Merged per-stem dependency sets (multiple batches union per stem).
    pub declarations: BTreeMap<StemId, BTreeSet<StemId>>,
    /// Present stems in arrival order.
    pub present: Vec<StemId>,
}

/// Gather both engine inputs concurrently.
///
/// The declaration batches and the present list are read in parallel;
/// normalization and merging happen only once both reads complete.
pub async fn gather<S>(source: &S, present_path: &Path) -> Result<Inputs, SourceError>
where
    S: DeclSource + ?Sized,
{
    let (batches, present) = tokio::join!(source.load(), fs::read_present_file(present_path));
    let batches = batches?;
    let present = present?;

    Ok(Inputs {
        declarations: declaration::normalize_batches(batches.iter()),
        present,
    })
}

/// Parse a present-stem list: one stem per line, `#` comments and blank
/// lines ignored, arrival order preserved.
pub fn parse_present(text: &str) -> Vec<StemId> {
    let mut stems = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Ok(stem) = StemId::new(line) else {
            continue;
        };
        stems.push(stem);
    }
    stems
}
