//! Params command
//!
//! Shows each parameter's normalized range, curve and default value.

use crate::ParamsArgs;
use anyhow::Result;
use looks_tools::{ColourCorrection, Curve, Parameterized, Tool};
use std::path::Path;
use std::sync::Arc;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: ParamsArgs, config: Option<&Path>, verbose: u8) -> Result<()> {
    let config = super::load_config(config)?;
    let table = Arc::new(config.parameter_table()?);
    let tool = ColourCorrection::with_table(Arc::clone(&table));
    trace!(probe = ?args.probe, "params::run");

    println!("{} ({})", tool.name(), tool.icon());
    println!("  {:<12} {:>8} {:>8} {:>8}  curve", "parameter", "min", "max", "default");
    for (parameter, spec) in table.iter() {
        let curve = match spec.curve {
            Curve::Linear { k } => format!("linear k={k}"),
            Curve::Piecewise {
                native_min,
                neutral,
                native_max,
            } => format!("piecewise {native_min} / {neutral} / {native_max}"),
        };
        println!(
            "  {:<12} {:>8} {:>8} {:>8.1}  {}",
            parameter.label(),
            spec.min,
            spec.max,
            tool.value(parameter),
            curve
        );
        if let Some(v) = args.probe {
            println!("  {:<12} {v} -> {}", "", spec.to_native(v));
        }
    }

    if verbose > 0 {
        println!();
        println!("Pipeline: {}", tool.filter().names().join(" -> "));
    }
    Ok(())
}
