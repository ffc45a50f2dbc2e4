//! deps command - Show the direct dependencies of a stem

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;

use crate::cli::Context;
use crate::core::config::Config;
use crate::core::declaration;
use crate::core::naming;
use crate::core::types::StemId;
use crate::source::{fs::FsDeclSource, DeclSource};
use crate::ui::output;

/// Show the normalized declared dependencies of a stem plus its implicit
/// ancestor.
pub fn deps(ctx: &Context, stem: &str, deps: Vec<PathBuf>) -> Result<()> {
    let config = Config::load(Some(&ctx.working_dir()))?;

    let record = naming::parse(stem)?;
    let stem_id = StemId::new(stem)?;

    let deps = if deps.is_empty() {
        config.deps().to_vec()
    } else {
        deps
    };
    let deps: Vec<PathBuf> = deps.into_iter().map(|p| ctx.resolve(p)).collect();

    let rt = tokio::runtime::Runtime::new()?;
    let batches = rt.block_on(FsDeclSource::new(deps).load())?;
    let declarations = declaration::normalize_batches(batches.iter());

    let mut direct: BTreeSet<StemId> = declarations.get(&stem_id).cloned().unwrap_or_default();
    // The implicit direct dependency is the nearest ancestor only; the
    // rest of the chain belongs to the ancestors themselves.
    if let Some(ancestor) = record.ancestor_chain().into_iter().next() {
        direct.insert(ancestor);
    }

    let sorted: Vec<StemId> = direct.into_iter().collect();
    if ctx.json {
        println!("{}", output::format_sequence_json(&sorted));
    } else if sorted.is_empty() {
        output::print(format!("{stem} has no direct dependencies"), ctx.verbosity);
    } else {
        println!("{}", output::format_sequence(&sorted));
    }

    Ok(())
}
