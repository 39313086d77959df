//! Check command
//!
//! Validates session configs without rendering anything.

use crate::CheckArgs;
use anyhow::{Result, bail};
use looks_gallery::SessionConfig;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: CheckArgs, verbose: u8) -> Result<()> {
    let mut failed = 0usize;
    for path in &args.input {
        trace!(path = %path.display(), "check::run");
        match SessionConfig::from_file(path).and_then(|c| c.validate().map(|_| c)) {
            Ok(config) => {
                println!("{}: ok", path.display());
                if verbose > 0 {
                    println!(
                        "  {} looks, initial {}, previews {}, parameters {}",
                        config.gallery.looks.len(),
                        config.gallery.initial,
                        config
                            .preview
                            .max_dimension
                            .map_or_else(|| "full size".to_string(), |d| format!("<= {d}px")),
                        if config.parameters.is_some() { "custom" } else { "default" },
                    );
                }
            }
            Err(e) => {
                failed += 1;
                println!("{}: {}", path.display(), e);
            }
        }
    }
    if failed > 0 {
        bail!("{} of {} config(s) invalid", failed, args.input.len());
    }
    Ok(())
}
