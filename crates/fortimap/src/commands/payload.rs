//! `payload`: assemble the request body for a configuration offline.

use fortimap_core::{Context, ResourceData, StandardHelpers, assemble};

use crate::cli::{GlobalOpts, PayloadArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &PayloadArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let schema = util::resolve_schema(&args.resource)?;
    let config = util::read_object(&args.file)?;
    let data = match &args.state {
        Some(path) => ResourceData::from_snapshot(util::read_snapshot(path)?, config),
        None => ResourceData::new(config),
    };

    let helpers = StandardHelpers::default();
    let version = args.firmware.as_deref().unwrap_or_default();
    let body = assemble(schema, &data, &Context::new(&helpers, version))?;
    tracing::debug!(resource = schema.name, version, fields = body.len(), "assembled");

    let out = output::render_object(&global.output, &body, schema.path)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
