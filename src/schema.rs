//! Typed views over the known parameter sections
//!
//! The generic document is what gets handed downstream; these structs
//! exist so the `validate` command can type-check the sections the
//! simulation side actually reads. Field sets stay deliberately close to
//! what the consumers index; unknown keys pass through untouched.

use crate::document::ConfigDocument;
use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::Value;
use std::path::PathBuf;

/// Typed parameter set for the known sections. Sections absent from the
/// document fall back to defaults; `optimization` stays `None` when
/// absent because its mere presence enables the adjoint machinery
/// downstream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Params {
    pub general: GeneralSettings,
    pub wind_farm: WindFarmSettings,
    pub domain: DomainSettings,
    pub refine: RefineSettings,
    pub function_space: FunctionSpaceSettings,
    pub boundary_condition: BoundaryConditionSettings,
    pub problem: ProblemSettings,
    pub solver: SolverSettings,
    pub optimization: Option<OptimizationSettings>,
}

impl Params {
    /// Section names this crate knows how to type-check.
    pub const KNOWN_SECTIONS: [&'static str; 9] = [
        "general",
        "wind_farm",
        "domain",
        "refine",
        "function_space",
        "boundary_condition",
        "problem",
        "solver",
        "optimization",
    ];

    /// Build the typed view from a merged document. Fails with
    /// [`ConfigError::Schema`] naming the offending section.
    pub fn from_document(doc: &ConfigDocument) -> Result<Self, ConfigError> {
        Ok(Self {
            general: section_as(doc, "general")?.unwrap_or_default(),
            wind_farm: section_as(doc, "wind_farm")?.unwrap_or_default(),
            domain: section_as(doc, "domain")?.unwrap_or_default(),
            refine: section_as(doc, "refine")?.unwrap_or_default(),
            function_space: section_as(doc, "function_space")?.unwrap_or_default(),
            boundary_condition: section_as(doc, "boundary_condition")?.unwrap_or_default(),
            problem: section_as(doc, "problem")?.unwrap_or_default(),
            solver: section_as(doc, "solver")?.unwrap_or_default(),
            optimization: section_as(doc, "optimization")?,
        })
    }
}

fn section_as<T: DeserializeOwned>(
    doc: &ConfigDocument,
    name: &str,
) -> Result<Option<T>, ConfigError> {
    let Some(section) = doc.section(name) else {
        return Ok(None);
    };
    serde_yaml::from_value(Value::Mapping(section.entries().clone()))
        .map(Some)
        .map_err(|e| ConfigError::Schema { section: name.to_string(), source: e })
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub name: Option<String>,
    pub preappend_datetime: bool,
    /// Which fields get written out: `mesh`, `initial_guess`, `height`,
    /// `turbine_force`, `solution`.
    pub output: Vec<String>,
    pub output_folder: Option<PathBuf>,
    pub dolfin_adjoint: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindFarmSettings {
    /// Farm layout: `grid`, `random`, or `imported`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub grid_rows: Option<u32>,
    pub grid_cols: Option<u32>,
    /// Farm extents along x/y, meters.
    pub ex_x: Option<[f64; 2]>,
    pub ex_y: Option<[f64; 2]>,
    /// Hub height, meters.
    #[serde(rename = "HH")]
    pub hub_height: Option<f64>,
    /// Rotor diameter, meters.
    #[serde(rename = "RD")]
    pub rotor_diameter: Option<f64>,
    pub thickness: Option<f64>,
    pub yaw: Option<f64>,
    pub axial: Option<f64>,
    /// Turbine listing for `imported` farms.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DomainSettings {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub x_range: Option<[f64; 2]>,
    pub y_range: Option<[f64; 2]>,
    pub z_range: Option<[f64; 2]>,
    pub nx: Option<u32>,
    pub ny: Option<u32>,
    pub nz: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RefineSettings {
    pub warp_type: Option<String>,
    pub warp_percent: Option<f64>,
    pub warp_height: Option<f64>,
    pub farm_num: u32,
    pub farm_type: Option<String>,
    pub farm_factor: Option<f64>,
    pub refine_custom: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FunctionSpaceSettings {
    /// Element family: `linear` or `taylor_hood`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoundaryConditionSettings {
    /// Inflow profile: `uniform`, `power`, or `log`.
    pub vel_profile: Option<String>,
    /// Inflow velocity at hub height, m/s.
    #[serde(rename = "HH_vel")]
    pub hub_velocity: Option<f64>,
    /// Von Karman constant for the log profile.
    pub k: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProblemSettings {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub viscosity: Option<f64>,
    /// Mixing length cap for the turbulence model.
    pub lmax: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// `steady` or `multiangle`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub save_power: bool,
    pub num_wind_angles: Option<u32>,
    /// Whether the final wind angle is included in the sweep.
    pub endpoint: Option<bool>,
    /// Wind angle sweep bounds, radians.
    pub wind_range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OptimizationSettings {
    /// What the optimizer may move: `layout`, `yaw`, `axial`.
    pub control_types: Vec<String>,
    pub layout_bounds: Option<Vec<[f64; 2]>>,
    pub taylor_test: bool,
    pub optimize: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_document;
    use crate::merge::MergeStrategy;

    const FARM_2X3: &str = "\
general:
  name: 2x3_farm
  output: [mesh, solution]
  dolfin_adjoint: true
wind_farm:
  type: grid
  grid_rows: 2
  grid_cols: 3
  ex_x: [-1800, 1800]
  ex_y: [-1800, 1800]
  HH: 90
  RD: 126
  thickness: 10.5
  yaw: 0.0
  axial: 0.33
domain:
  type: box
  x_range: [-2400, 2400]
  y_range: [-2400, 2400]
  z_range: [0.04, 640]
  nx: 24
  ny: 24
  nz: 10
boundary_condition:
  vel_profile: log
  HH_vel: 8.0
  k: 0.4
problem:
  type: stabilized
  viscosity: 5
solver:
  type: multiangle
  save_power: true
  num_wind_angles: 12
optimization:
  control_types: [layout]
  taylor_test: true
  optimize: true
";

    #[test]
    fn test_typed_view_of_realistic_file() {
        let doc = parse_document(FARM_2X3, MergeStrategy::MergeKeys).expect("doc");
        let params = Params::from_document(&doc).expect("typed view");

        assert_eq!(params.general.name.as_deref(), Some("2x3_farm"));
        assert!(params.general.dolfin_adjoint);
        assert_eq!(params.wind_farm.kind.as_deref(), Some("grid"));
        assert_eq!(params.wind_farm.hub_height, Some(90.0));
        assert_eq!(params.wind_farm.rotor_diameter, Some(126.0));
        assert_eq!(params.domain.nx, Some(24));
        assert_eq!(params.domain.x_range, Some([-2400.0, 2400.0]));
        assert_eq!(params.boundary_condition.hub_velocity, Some(8.0));
        assert_eq!(params.solver.num_wind_angles, Some(12));

        let optimization = params.optimization.expect("optimization present");
        assert_eq!(optimization.control_types, vec!["layout"]);
        assert!(optimization.taylor_test);
    }

    #[test]
    fn test_absent_sections_default() {
        let doc = parse_document("general:\n  name: bare\n", MergeStrategy::MergeKeys)
            .expect("doc");
        let params = Params::from_document(&doc).expect("typed view");

        assert_eq!(params.solver.kind, None);
        assert!(!params.solver.save_power);
        assert!(params.optimization.is_none());
    }

    #[test]
    fn test_unknown_keys_are_tolerated() {
        let doc = parse_document(
            "domain:\n  nx: 24\n  some_future_knob: 7\n",
            MergeStrategy::MergeKeys,
        )
        .expect("doc");
        let params = Params::from_document(&doc).expect("typed view");
        assert_eq!(params.domain.nx, Some(24));
    }

    #[test]
    fn test_schema_error_names_the_section() {
        let doc = parse_document("domain:\n  nx: twenty-four\n", MergeStrategy::MergeKeys)
            .expect("doc");
        let err = Params::from_document(&doc).expect_err("nx must be numeric");
        match err {
            ConfigError::Schema { section, .. } => assert_eq!(section, "domain"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
