//! `neko validate`: check `.neko.json`.

use std::sync::Arc;

use neko_core::prelude::InspectService;

use crate::{cli::ValidateArgs, commands::Context, error::CliResult, output::OutputManager};

pub fn execute(args: ValidateArgs, ctx: &Context, output: &OutputManager) -> CliResult<()> {
    let registry = ctx.registry();
    let config = InspectService::new(Arc::clone(&ctx.store), &registry).validate()?;

    output.success(&format!(
        "{} is valid",
        ctx.store.location().display()
    ))?;

    if args.show {
        output.field("Project", &config.project_name)?;
        if !config.project_owner.is_empty() {
            output.field("Owner", &config.project_owner)?;
        }
        output.field("Project type", config.project_type.as_str())?;
        output.field("Release system", &config.release_system)?;
        output.field("Version", &config.version)?;
    }
    Ok(())
}
