//! `neko init`: create `.neko.json` and prepare the release system.

use std::sync::Arc;

use neko_core::prelude::{InitOutcome, InitRequest, InitService};

use crate::{cli::InitArgs, commands::Context, error::CliResult, output::OutputManager};

pub fn execute(args: InitArgs, ctx: &Context, output: &OutputManager) -> CliResult<()> {
    let registry = ctx.registry();
    let request = InitRequest {
        force: args.force,
        fallback_name: ctx.directory_name(),
    };

    let service = InitService::new(
        Arc::clone(&ctx.store),
        Arc::clone(&ctx.survey),
        ctx.repository(),
        &registry,
    );

    match service.run(&request)? {
        InitOutcome::Kept => {
            output.warning(&format!(
                "Kept the existing {} (use --force to overwrite)",
                ctx.store.location().display()
            ))?;
        }
        InitOutcome::Created {
            config,
            managed_files,
        } => {
            output.success(&format!(
                "Created {} for {} ({})",
                ctx.store.location().display(),
                config.project_name,
                config.release_system
            ))?;
            output.header("Next steps")?;
            let mut files = vec![ctx.store.location().display().to_string()];
            files.extend(managed_files.iter().map(|f| f.to_string()));
            output.print(&format!("  1. Review and commit: {}", files.join(", ")))?;
            output.print("  2. Run `neko release patch` (or minor / major) on a release branch")?;
        }
    }
    Ok(())
}
