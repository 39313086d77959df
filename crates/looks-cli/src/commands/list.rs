//! List command
//!
//! Prints the configured gallery in display order.

use crate::ListArgs;
use anyhow::Result;
use looks_ops::{Filter, PhotoEffect, SharedFilter};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: ListArgs, config: Option<&Path>, verbose: u8) -> Result<()> {
    let config = super::load_config(config)?;
    let gallery = config.gallery()?;
    trace!(looks = gallery.len(), "list::run");

    if verbose > 0 {
        println!("{} looks (initial: {})", gallery.len(), config.gallery.initial);
    }
    for (index, look) in gallery.iter().enumerate() {
        let marker = if index == config.gallery.initial { "*" } else { " " };
        println!("{marker} {index:>2}  {}", look.name());
        if args.stages {
            print_stages(look);
        }
    }
    Ok(())
}

fn print_stages(look: &SharedFilter) {
    // Configured galleries only hold presets, so the name round-trips.
    let stages = look
        .name()
        .parse::<PhotoEffect>()
        .map(|effect| effect.filter().names().join(" -> "));
    match stages {
        Ok(s) if s.is_empty() => println!("        (identity)"),
        Ok(s) => println!("        {s}"),
        Err(_) => println!("        {}", look.name()),
    }
}
