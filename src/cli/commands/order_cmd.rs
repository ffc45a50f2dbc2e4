//! order command - Compute the emission order for present stems

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::core::declaration;
use crate::core::graph;
use crate::core::types::StemId;
use crate::order::{self, Strategy};
use crate::source::{self, fs::FsDeclSource, DeclSource};
use crate::ui::output;

/// Compute and print the emission order.
///
/// This is a synchronous wrapper that uses tokio to run the async input
/// gathering; graph construction and ordering stay synchronous and begin
/// only once both inputs are fully materialized.
pub fn order(
    ctx: &Context,
    stems: Vec<String>,
    present: Option<PathBuf>,
    deps: Vec<PathBuf>,
    strategy: Option<String>,
) -> Result<()> {
    let config = Config::load(Some(&ctx.working_dir()))?;

    let strategy = match strategy {
        Some(name) => name.parse::<Strategy>()?,
        None => config.strategy().unwrap_or_default(),
    };

    let deps = if deps.is_empty() {
        config.deps().to_vec()
    } else {
        deps
    };
    let deps: Vec<PathBuf> = deps.into_iter().map(|p| ctx.resolve(p)).collect();
    let decl_source = FsDeclSource::new(deps);

    let rt = tokio::runtime::Runtime::new()?;
    let inputs = if stems.is_empty() {
        let present_path = present
            .or_else(|| config.present().map(PathBuf::from))
            .context(
                "no present stems: pass stems on the command line, use --present, \
                 or configure 'present' in stemflow.toml",
            )?;
        let present_path = ctx.resolve(present_path);
        rt.block_on(source::gather(&decl_source, &present_path))?
    } else {
        // Positional stems are already in hand; only declarations are read.
        let batches = rt.block_on(decl_source.load())?;
        let present = stems
            .into_iter()
            .map(StemId::new)
            .collect::<Result<Vec<_>, _>>()?;
        source::Inputs {
            declarations: declaration::normalize_batches(batches.iter()),
            present,
        }
    };

    output::debug(
        format!(
            "{} declared stems, {} present stems, strategy {}",
            inputs.declarations.len(),
            inputs.present.len(),
            strategy
        ),
        ctx.verbosity,
    );

    let known: BTreeSet<StemId> = inputs.present.iter().cloned().collect();
    let graph = graph::build(&inputs.declarations, &known)?;
    let sequence = order::order_with(&graph, &inputs.present, strategy)?;

    // The ordered sequence is the command's result and always prints,
    // even in quiet mode.
    if ctx.json {
        println!("{}", output::format_sequence_json(&sequence));
    } else if !sequence.is_empty() {
        println!("{}", output::format_sequence(&sequence));
    }

    Ok(())
}
