//! `neko release`: run the release pipeline.

use std::sync::Arc;

use neko_core::prelude::{ReleaseRequest, ReleaseService};
use tracing::info;

use crate::{cli::ReleaseArgs, commands::Context, error::CliResult, output::OutputManager};

pub fn execute(args: ReleaseArgs, ctx: &Context, output: &OutputManager) -> CliResult<()> {
    let registry = ctx.registry();
    let request = ReleaseRequest {
        release_type: args.release_type,
        preflight: ctx.config.preflight_policy(args.advisory),
    };
    info!(preflight = ?request.preflight, "Starting release");

    let outcome =
        ReleaseService::new(Arc::clone(&ctx.store), ctx.repository(), &registry).run(&request)?;

    for failure in &outcome.preflight.failures {
        output.warning(&format!("{}: {}", failure.gate, failure.error))?;
    }
    for step in &outcome.steps.downgraded {
        output.warning(&format!("{step} failed; continued with the release"))?;
    }
    if !outcome.config_persisted {
        output.warning(&format!(
            "Could not record {} in {}",
            outcome.next,
            ctx.store.location().display()
        ))?;
    }

    output.success(&format!(
        "Released {} {} ({} from {})",
        outcome.repo.slug(),
        outcome.next,
        outcome.kind,
        outcome.baseline
    ))?;
    output.field("Release system", &outcome.tool)?;
    if !outcome.steps.completed.is_empty() {
        output.field("Steps", &outcome.steps.completed.join(", "))?;
    }
    Ok(())
}
