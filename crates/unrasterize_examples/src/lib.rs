#![forbid(unsafe_code)]

mod population;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use tracing_subscriber::{fmt, EnvFilter};
use unrasterize::prelude::*;

pub use population::{PopulationConfig, Settlement, SyntheticPopulation};

/// Installs a `fmt` subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

/// Writes points as GeoJSON to `path`, or to stdout when `path` is `None`.
pub fn write_geojson(
    path: Option<&Path>,
    points: &[RepresentativePoint],
    value_attribute: &str,
) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            GeoJsonWriter::new(file)
                .with_value_attribute(value_attribute)
                .with_pretty(true)
                .write_points(points)?;
            tracing::info!("wrote {} points to {}", points.len(), path.display());
        }
        None => {
            GeoJsonWriter::new(io::stdout().lock())
                .with_value_attribute(value_attribute)
                .write_points(points)?;
        }
    }
    Ok(())
}

/// First command line argument, used by the binaries as an optional output path.
pub fn output_path_arg() -> Option<std::path::PathBuf> {
    std::env::args_os().nth(1).map(Into::into)
}
