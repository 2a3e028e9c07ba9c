//! Validate command implementation

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use super::parse_merge_strategy;
use crate::loader::load_document;
use crate::schema::Params;

#[derive(Args)]
pub struct ValidateArgs {
    /// Parameter file to validate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Duplicate-section strategy: 'merge-keys' or 'last-block'
    #[arg(long, value_name = "STRATEGY", default_value = "merge-keys")]
    pub merge: String,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let strategy = parse_merge_strategy(&args.merge)?;
    let doc = load_document(&args.file, strategy)?;

    for name in doc.names() {
        if !Params::KNOWN_SECTIONS.contains(&name) {
            tracing::warn!("unknown section `{name}` is passed through untyped");
        }
    }

    let params = Params::from_document(&doc)?;
    check_consistency(&params)?;

    println!("OK: {} ({} sections)", args.file.display(), doc.len());
    Ok(())
}

/// Cross-key requirements the solver side only enforces at run time,
/// surfaced here before a simulation is ever submitted.
fn check_consistency(params: &Params) -> Result<()> {
    if params.wind_farm.kind.as_deref() == Some("grid") {
        let mut missing = Vec::new();
        if params.wind_farm.grid_rows.is_none() {
            missing.push("grid_rows");
        }
        if params.wind_farm.grid_cols.is_none() {
            missing.push("grid_cols");
        }
        if params.wind_farm.ex_x.is_none() {
            missing.push("ex_x");
        }
        if params.wind_farm.ex_y.is_none() {
            missing.push("ex_y");
        }
        if !missing.is_empty() {
            bail!("wind_farm: grid farms require {}", missing.join(", "));
        }
    }

    if params.solver.kind.as_deref() == Some("multiangle")
        && params.solver.num_wind_angles.is_none()
    {
        bail!("solver: multiangle solves require num_wind_angles");
    }

    for (axis, count) in
        [("nx", params.domain.nx), ("ny", params.domain.ny), ("nz", params.domain.nz)]
    {
        if count == Some(0) {
            bail!("domain: {axis} must be at least 1");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_document;
    use crate::merge::MergeStrategy;

    fn params_of(content: &str) -> Params {
        let doc = parse_document(content, MergeStrategy::MergeKeys).expect("doc");
        Params::from_document(&doc).expect("typed view")
    }

    #[test]
    fn test_grid_farm_requires_shape_and_extents() {
        let params = params_of("wind_farm:\n  type: grid\n  grid_rows: 2\n");
        let err = check_consistency(&params).expect_err("incomplete grid farm");
        let message = err.to_string();
        assert!(message.contains("grid_cols"), "got: {message}");
        assert!(message.contains("ex_x"), "got: {message}");
        assert!(!message.contains("grid_rows,"), "grid_rows was provided: {message}");
    }

    #[test]
    fn test_multiangle_requires_angle_count() {
        let params = params_of("solver:\n  type: multiangle\n");
        let err = check_consistency(&params).expect_err("missing num_wind_angles");
        assert!(err.to_string().contains("num_wind_angles"));
    }

    #[test]
    fn test_zero_cell_count_is_rejected() {
        let params = params_of("domain:\n  type: box\n  ny: 0\n");
        let err = check_consistency(&params).expect_err("ny of zero");
        assert!(err.to_string().contains("ny"));
    }

    #[test]
    fn test_steady_solve_with_defaults_passes() {
        let params = params_of("solver:\n  type: steady\ndomain:\n  nx: 24\n");
        check_consistency(&params).expect("consistent");
    }
}
