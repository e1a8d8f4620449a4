//! Configuration models and loaders for the Mission Designer binding workspace.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Celestial body offered by the body selector. Catalog order is the selector index.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub mu_km3_s2: f64,
    pub radius_km: f64,
}

/// Seed for a mission session: the three orbits and the maneuver sequence.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub departure: OrbitConfig,
    #[serde(default)]
    pub arrival: Option<OrbitConfig>,
    /// Initial orbit of the propagation mission.
    #[serde(default)]
    pub propagation: Option<OrbitConfig>,
    #[serde(default)]
    pub maneuvers: Vec<ManeuverConfig>,
}

/// Orbit seed. Groups that are omitted stay at zero.
#[derive(Debug, Deserialize, Clone)]
pub struct OrbitConfig {
    #[serde(default)]
    pub body: usize,
    /// `cartesian`, `keplerian` or `modified-keplerian`.
    #[serde(default = "default_representation")]
    pub representation: String,
    #[serde(default)]
    pub cartesian: Option<CartesianConfig>,
    #[serde(default)]
    pub keplerian: Option<KeplerianConfig>,
    #[serde(default)]
    pub modified_keplerian: Option<ModifiedKeplerianConfig>,
}

fn default_representation() -> String {
    "cartesian".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CartesianConfig {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// Classical elements. The angles are shared with the modified Keplerian group.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct KeplerianConfig {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub periapsis_anomaly_deg: f64,
    pub true_anomaly_deg: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ModifiedKeplerianConfig {
    pub periapsis_radius_km: f64,
    pub apoapsis_radius_km: f64,
}

/// Maneuver seed. Derived effects are optional and default to zero.
#[derive(Debug, Deserialize, Clone)]
pub struct ManeuverConfig {
    /// Type label (`hohmann`, `plane-change`, ...) or integer code.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub option: u32,
    #[serde(default)]
    pub option_value: f64,
    #[serde(default)]
    pub delta_velocity_km_s: f64,
    #[serde(default)]
    pub delta_time_h: f64,
    #[serde(default)]
    pub delta_mass_kg: f64,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load the body catalog from a YAML list, a single TOML record, or a directory of TOML records.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    load_records(path)
}

/// Load a scenario from a YAML or TOML file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
