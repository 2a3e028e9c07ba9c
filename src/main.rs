//! Binary entry point for the `wind-params` CLI.

use anyhow::Result;

fn main() -> Result<()> {
    wind_params::cli::run()
}
