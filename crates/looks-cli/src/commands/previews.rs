//! Previews command
//!
//! Renders every gallery look through the preview cache and writes one PNG
//! per look. Looks are rendered in parallel.

use crate::PreviewsArgs;
use anyhow::{Context, Result};
use looks_gallery::GalleryError;
use looks_ops::Filter;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: PreviewsArgs, config: Option<&Path>, verbose: u8) -> Result<()> {
    trace!(output = %args.output.display(), "previews::run");
    let mut config = super::load_config(config)?;
    if let Some(size) = args.size {
        config.preview.max_dimension = Some(size);
    }
    let mut session = config.build()?;
    session.set_base_image(super::load_or_card(args.input.as_deref(), &args.card)?);

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let cache = session.cache();
    let looks: Vec<_> = session.gallery().iter().collect();
    let results: Vec<(String, Result<()>)> = looks
        .par_iter()
        .map(|&look| {
            let name = look.name().to_string();
            let result = cache
                .get_or_render(look.as_ref())
                .map_err(anyhow::Error::from)
                .and_then(|image| {
                    let path = args.output.join(format!("{}.png", name.to_lowercase()));
                    super::save_image(&path, &image)
                });
            (name, result)
        })
        .collect();

    let mut failed = 0usize;
    for (name, result) in &results {
        match result {
            Ok(()) if verbose > 0 => println!("{name}: ok"),
            Ok(()) => {}
            Err(e) => {
                failed += 1;
                let retryable = e
                    .downcast_ref::<GalleryError>()
                    .is_some_and(GalleryError::is_retryable);
                let hint = if retryable { " (retryable)" } else { "" };
                println!("{name}: {e:#}{hint}");
            }
        }
    }

    let stats = session.cache().stats();
    if verbose > 0 {
        println!(
            "{} previews, {} renders, hit rate {:.1}%",
            results.len(),
            stats.renders,
            stats.hit_rate()
        );
    }
    if failed > 0 {
        anyhow::bail!("{} look(s) failed to render", failed);
    }
    Ok(())
}
