//! inspect command - Show the naming decomposition of a stem

use anyhow::Result;
use serde::Serialize;

use crate::cli::Context;
use crate::core::naming::{self, NamingRecord};
use crate::core::types::StemId;
use crate::ui::output;

/// JSON shape of the inspect output.
#[derive(Serialize)]
struct InspectReport<'a> {
    stem: &'a str,
    record: &'a NamingRecord,
    entity_only: bool,
    ancestors: &'a [StemId],
}

/// Parse a stem and display its facets and ancestor chain.
pub fn inspect(ctx: &Context, stem: &str) -> Result<()> {
    let record = naming::parse(stem)?;
    let ancestors = record.ancestor_chain();

    if ctx.json {
        let report = InspectReport {
            stem,
            record: &record,
            entity_only: record.is_entity_only(),
            ancestors: &ancestors,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::print(format!("stem:      {stem}"), ctx.verbosity);
    output::print(format!("base:      {}", record.base()), ctx.verbosity);
    if let Some(name) = record.modifier_name() {
        match record.modifier_value() {
            Some(value) => {
                output::print(format!("modifier:  {name} = {value}"), ctx.verbosity)
            }
            None => output::print(format!("modifier:  {name}"), ctx.verbosity),
        }
    }
    if let Some(sub) = record.sub_entity() {
        output::print(format!("sub:       {sub}"), ctx.verbosity);
    }
    if let Some(name) = record.sub_modifier_name() {
        match record.sub_modifier_value() {
            Some(value) => {
                output::print(format!("sub mod:   {name} = {value}"), ctx.verbosity)
            }
            None => output::print(format!("sub mod:   {name}"), ctx.verbosity),
        }
    }
    if ancestors.is_empty() {
        output::print("ancestors: none (entity-only)", ctx.verbosity);
    } else {
        output::print("ancestors:", ctx.verbosity);
        output::print(output::format_list(&ancestors, "  "), ctx.verbosity);
    }

    Ok(())
}
