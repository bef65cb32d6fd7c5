//! Metrics command - list the registered metric keys.

use std::io::{self, Write};

use anyhow::Result;
use cbir_core::{MetricRegistry, MetricSettings};

/// Print every registry key with the metric it selects.
pub fn run() -> Result<()> {
    let registry = MetricRegistry::with_defaults(&MetricSettings::default())?;
    let mut out = io::stdout().lock();
    write_keys(&registry, &mut out)?;
    out.flush()?;
    Ok(())
}

fn write_keys(registry: &MetricRegistry, out: &mut impl Write) -> Result<()> {
    for (key, metric) in registry.iter() {
        writeln!(out, "{key:<12}{}", metric.name())?;
    }
    Ok(())
}
