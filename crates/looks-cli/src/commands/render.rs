//! Render command
//!
//! Applies one look and the colour-correction tool at full size.

use crate::RenderArgs;
use anyhow::{Context, Result};
use looks_ops::Filter;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: RenderArgs, config: Option<&Path>, verbose: u8) -> Result<()> {
    trace!(output = %args.output.display(), look = ?args.look, "render::run");
    let config = super::load_config(config)?;
    let mut session = config.build()?;

    let image = super::load_or_card(args.input.as_deref(), &args.card)?;
    session.set_base_image(image);

    if let Some(name) = &args.look {
        let index = session
            .gallery()
            .iter()
            .position(|l| l.name().eq_ignore_ascii_case(name))
            .with_context(|| format!("look '{}' is not in the gallery", name))?;
        session.pick(index)?;
    }

    for assignment in &args.set {
        let (parameter, value) = super::parse_assignment(assignment)?;
        let applied = session.set_value(value, parameter)?;
        if applied != value {
            println!("{} clamped to {}", parameter, applied);
        }
    }

    let pipeline = session.pipeline()?;
    info!(look = pipeline.name(), stages = ?pipeline.names(), "Rendering");
    if verbose > 0 {
        println!("Rendering {} ({})", pipeline.name(), pipeline.names().join(" -> "));
    }

    let output = session
        .render()
        .with_context(|| format!("Failed to render {}", pipeline.name()))?;
    super::save_image(&args.output, &output)?;

    if verbose > 0 {
        println!("Wrote {}", args.output.display());
    }
    Ok(())
}
