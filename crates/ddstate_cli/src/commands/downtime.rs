//! Downtime command - schedules or cancels a downtime for a scope.

use ddstate_core::prelude::*;

use super::context::{self, RunContext};
use crate::DowntimeArgs;

/// Executes the `ddstate downtime` command.
pub fn run(args: &DowntimeArgs) -> super::Result<Report> {
    let params = build_params(args);
    params.validate().map_err(DdStateError::from)?;

    let context = RunContext::load(&args.connection)?;
    let client = match context.client() {
        Ok(client) => client,
        Err(e) => return Ok(Report::failed(e.to_string())),
    };

    let reconciler = DowntimeReconciler::new(&client);
    context::block_on(reconciler.run(&params))
}

fn build_params(args: &DowntimeArgs) -> DowntimeParams {
    DowntimeParams {
        start: args.start,
        end: args.end,
        message: args.message.clone(),
        id: args.id,
        current_only: args.current_only,
        ..DowntimeParams::new(args.state, &args.scope)
    }
}
