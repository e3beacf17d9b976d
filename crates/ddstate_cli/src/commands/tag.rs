//! Tag command - adds tags to, or removes tags from, a host.

use ddstate_core::prelude::*;

use super::context::{self, RunContext};
use crate::TagArgs;

/// Executes the `ddstate tag` command.
pub fn run(args: &TagArgs) -> super::Result<Report> {
    let params = build_params(args);
    params.validate().map_err(DdStateError::from)?;

    let context = RunContext::load(&args.connection)?;
    let client = match context.client() {
        Ok(client) => client,
        Err(e) => return Ok(Report::failed(e.to_string())),
    };

    let reconciler = TagReconciler::new(&client);
    context::block_on(reconciler.run(&params))
}

fn build_params(args: &TagArgs) -> TagParams {
    let params = TagParams {
        source: args.source.clone(),
        by_source: args.by_source,
        ..TagParams::new(args.state, args.host.as_str())
    };

    match args.tags.as_deref() {
        Some(tags) => params.with_tags(tags),
        None => params,
    }
}
