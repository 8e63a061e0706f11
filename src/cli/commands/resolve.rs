use anyhow::Result;

use super::super::args::ResolveCommand;
use super::{CommandResult, CommandSummary, ResolveSummary, helper::done};
use crate::core::{BuildContext, Param};

/// Resolve a key through the runtime path: fallback lookup, plural
/// selection and interpolation.
pub fn resolve(cmd: ResolveCommand) -> Result<CommandResult> {
    let ctx = BuildContext::new(&cmd.common)?;
    let mut localizer = ctx.localizer()?;
    if let Some(locale) = &cmd.locale {
        localizer.set_locale(locale)?;
    }

    let params: Vec<Param> = cmd.params.iter().map(|arg| Param::parse_arg(arg)).collect();
    let text = localizer.localize_key(&cmd.key, &params);

    Ok(done(CommandSummary::Resolve(ResolveSummary {
        locale: localizer.locale().to_string(),
        text,
    })))
}
