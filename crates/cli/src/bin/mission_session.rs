use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use mission_designer::binding::scenario::mission_from_config;
use mission_designer::binding::{
    ApplyMode, DetachedViews, FieldInputs, InMemoryMission, ManeuverRow,
    ManeuverSequenceController, OrbitSlot, RestoredOrbit, StateRepresentationMapper,
};
use mission_designer::config::{BodyConfig, load_bodies, load_scenario};
use mission_designer::common::vector;
use mission_designer::export::snapshot::{
    self, FieldValue, ManeuverRow as ExportRow, OrbitSnapshot, SessionSnapshot,
};
use mission_designer::maneuvers::{HohmannDirection, ManeuverDraft, ManeuverType};
use mission_designer::orbits::{FieldLayout, RepresentationMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Drive the orbit and maneuver dialogs against a scenario backend"
)]
struct Cli {
    /// Scenario file (YAML or TOML)
    #[arg(long)]
    scenario: PathBuf,

    /// Body catalog (YAML list, TOML file, or directory of TOML files)
    #[arg(long)]
    bodies: Option<PathBuf>,

    /// Orbit bound to the dialog
    #[arg(long, value_enum, default_value_t = OrbitChoice::Departure)]
    orbit: OrbitChoice,

    /// Widget naming used for inputs and output
    #[arg(long, value_enum, default_value_t = LayoutChoice::Standard)]
    layout: LayoutChoice,

    /// Write a JSON snapshot of the session (`-` for stdout)
    #[arg(long)]
    export: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Restore and print every orbit field group
    Show,
    /// Save one field group from WIDGET=TEXT inputs
    Save {
        /// Group to save (cartesian, keplerian, modified-keplerian)
        #[arg(long)]
        mode: RepresentationMode,

        /// Field input as WIDGET=TEXT (repeatable)
        #[arg(long = "set", value_name = "WIDGET=TEXT")]
        inputs: Vec<String>,

        /// Reference body index
        #[arg(long)]
        body: Option<usize>,

        /// Whether the backend keeps the dialog open or finalises the orbit
        #[arg(long, value_enum, default_value_t = ApplyChoice::Update)]
        apply: ApplyChoice,
    },
    /// Load the maneuver list, edit it, and optionally commit it back
    Maneuvers {
        /// Edit a row as ID=TYPE:OPTION:VALUE (repeatable). For Hohmann transfers OPTION may
        /// also be `periapsis-to-apoapsis` or `apoapsis-to-periapsis`.
        #[arg(long = "edit", value_name = "ID=TYPE:OPTION:VALUE")]
        edits: Vec<String>,

        /// Number of default rows to append
        #[arg(long, default_value_t = 0)]
        add: usize,

        /// Row id to delete (repeatable, applied in order)
        #[arg(long = "remove", value_name = "ID")]
        remove: Vec<u32>,

        /// Replace the backend sequence with the edited list
        #[arg(long, default_value_t = false)]
        commit: bool,
    },
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum OrbitChoice {
    Departure,
    Arrival,
    /// Initial orbit of the propagation mission
    Propagation,
}

impl OrbitChoice {
    fn slot(self) -> OrbitSlot {
        match self {
            OrbitChoice::Departure => OrbitSlot::Departure,
            OrbitChoice::Arrival => OrbitSlot::Arrival,
            OrbitChoice::Propagation => OrbitSlot::Propagation,
        }
    }
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum LayoutChoice {
    /// `x`, `semi_major_axis`, `raan_2`, ...
    Standard,
    /// Standard names prefixed with the orbit, e.g. `departure_x`
    Prefixed,
    /// `a`, `e`, `Omega`, `theta_2`, ...
    Symbolic,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum ApplyChoice {
    Update,
    Save,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let bodies = match &cli.bodies {
        Some(path) => load_bodies(path)
            .with_context(|| format!("loading body catalog {}", path.display()))?,
        None => Vec::new(),
    };
    let body_count = (!bodies.is_empty()).then_some(bodies.len());

    let scenario = load_scenario(&cli.scenario)
        .with_context(|| format!("loading scenario {}", cli.scenario.display()))?;
    let mut mission = mission_from_config(&scenario, body_count)?;

    let slot = cli.orbit.slot();
    let layout = match cli.layout {
        LayoutChoice::Standard => FieldLayout::standard(),
        LayoutChoice::Prefixed => FieldLayout::prefixed(slot.label()),
        LayoutChoice::Symbolic => FieldLayout::symbolic(),
    };

    let rows = match &cli.command {
        Command::Show => load_rows(&mut mission)?,
        Command::Save {
            mode,
            inputs,
            body,
            apply,
        } => {
            let inputs = parse_inputs(inputs)?;
            let apply = match apply {
                ApplyChoice::Update => ApplyMode::Update,
                ApplyChoice::Save => ApplyMode::Save,
            };
            let mut mapper = StateRepresentationMapper::new(mission.orbit_mut(slot), layout.clone());
            if let Some(count) = body_count {
                mapper = mapper.with_body_count(count);
            }
            if let Some(body) = body {
                mapper.select_body(*body)?;
            }
            mapper.save_and_apply(*mode, &inputs, apply)?;
            tracing::info!(%mode, orbit = slot.label(), "orbit group saved");
            load_rows(&mut mission)?
        }
        Command::Maneuvers {
            edits,
            add,
            remove,
            commit,
        } => edit_maneuvers(&mut mission, edits, *add, remove, *commit)?,
    };

    let restored =
        StateRepresentationMapper::new(mission.orbit_mut(slot), layout.clone()).restore_all();

    let export_to_stdout = cli.export.as_deref() == Some(Path::new("-"));
    if !export_to_stdout {
        print_orbit(slot, &restored, &layout, &bodies);
        print_maneuvers(&rows);
    }

    if let Some(path) = &cli.export {
        let body_name = bodies.get(restored.body).map(|body| body.name.as_str());
        let session = SessionSnapshot {
            scenario: scenario.name.as_deref(),
            orbit: OrbitSnapshot {
                body: restored.body,
                body_name,
                representation: restored.mode.label(),
                fields: restored
                    .display(&layout)
                    .into_iter()
                    .map(|(widget, value)| FieldValue { widget, value })
                    .collect(),
            },
            maneuvers: rows.iter().map(export_row).collect(),
        };
        let mut writer = snapshot::writer_for_path(path)?;
        snapshot::write_json(&mut writer, &session)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
    }

    Ok(())
}

fn load_rows(mission: &mut InMemoryMission) -> anyhow::Result<Vec<ManeuverRow>> {
    let mut controller = ManeuverSequenceController::new(mission, DetachedViews::new());
    controller.reload()?;
    Ok(controller.rows().map(|(_, _, row)| row.clone()).collect())
}

fn edit_maneuvers(
    mission: &mut InMemoryMission,
    edits: &[String],
    add: usize,
    remove: &[u32],
    commit: bool,
) -> anyhow::Result<Vec<ManeuverRow>> {
    let mut controller = ManeuverSequenceController::new(mission, DetachedViews::new());
    controller.reload()?;

    for edit in edits {
        let (id, draft) = parse_edit(edit)?;
        let handle = controller
            .handle_of(id)
            .with_context(|| format!("no maneuver row with id {id}"))?;
        if let Some(row) = controller.get_mut(handle) {
            row.draft = draft;
        }
    }
    for _ in 0..add {
        if controller.add().is_none() {
            bail!("could not create a maneuver row");
        }
    }
    for id in remove {
        if !controller.remove_by_id(*id) {
            tracing::warn!(id, "no maneuver row with that id");
        }
    }
    if commit {
        let count = controller.commit()?;
        tracing::info!(count, "maneuver list committed");
    }

    Ok(controller.rows().map(|(_, _, row)| row.clone()).collect())
}

fn parse_inputs(raw: &[String]) -> anyhow::Result<FieldInputs> {
    let mut inputs = FieldInputs::new();
    for entry in raw {
        let Some((widget, text)) = entry.split_once('=') else {
            bail!("input '{entry}' is not WIDGET=TEXT");
        };
        inputs.set(widget.trim(), text);
    }
    Ok(inputs)
}

fn parse_edit(raw: &str) -> anyhow::Result<(u32, ManeuverDraft)> {
    let (id, fields) = raw
        .split_once('=')
        .with_context(|| format!("edit '{raw}' is not ID=TYPE:OPTION:VALUE"))?;
    let id: u32 = id.trim().parse().context("maneuver id must be an integer")?;

    let parts: Vec<&str> = fields.split(':').collect();
    let [kind, option, value] = parts.as_slice() else {
        bail!("edit '{raw}' is not ID=TYPE:OPTION:VALUE");
    };
    let maneuver_type: ManeuverType = kind.parse()?;
    let option = parse_option(maneuver_type, option)?;
    let option_value: f64 = value.trim().parse().context("option value must be a number")?;
    Ok((id, ManeuverDraft::new(maneuver_type, option, option_value)))
}

fn parse_option(maneuver_type: ManeuverType, raw: &str) -> anyhow::Result<u32> {
    if let Ok(option) = raw.trim().parse::<u32>() {
        return Ok(option);
    }
    match maneuver_type {
        ManeuverType::Hohmann | ManeuverType::BiEllipticHohmann => {
            let direction: HohmannDirection = raw.parse()?;
            Ok(direction.option())
        }
        _ => bail!("option '{raw}' must be an integer for {maneuver_type}"),
    }
}

fn print_orbit(
    slot: OrbitSlot,
    restored: &RestoredOrbit,
    layout: &FieldLayout,
    bodies: &[BodyConfig],
) {
    let body_name = bodies
        .get(restored.body)
        .map(|body| body.name.as_str())
        .unwrap_or("-");
    let cartesian = restored.cartesian.values;
    let radius = vector::norm(&[cartesian[0], cartesian[1], cartesian[2]]);
    let speed = vector::norm(&[cartesian[3], cartesian[4], cartesian[5]]);

    println!("=== {} orbit ===", slot.label());
    println!("Body           : {} ({})", restored.body, body_name);
    println!("Representation : {}", restored.mode);
    println!("State vector   : |r| = {radius:.3} km, |v| = {speed:.3} km/s");
    for mode in RepresentationMode::ALL {
        let marker = if mode == restored.mode { "*" } else { " " };
        println!("{marker} [{mode}]");
        for (name, value) in layout.names(mode).iter().zip(restored.group(mode).values) {
            println!("    {name:<24} = {value}");
        }
    }
}

fn print_maneuvers(rows: &[ManeuverRow]) {
    println!("=== Maneuvers ({}) ===", rows.len());
    for row in rows {
        let effects = row.effects.unwrap_or_default();
        println!(
            "#{:<3} {:<20} option = {}, value = {}, dv = {:.3} km/s, dt = {:.3} h, dm = {:.3} kg",
            row.id,
            row.draft.maneuver_type,
            row.draft.option,
            row.draft.option_value,
            effects.delta_velocity,
            effects.delta_time,
            effects.delta_mass
        );
    }
}

fn export_row(row: &ManeuverRow) -> ExportRow<'static> {
    let effects = row.effects.unwrap_or_default();
    ExportRow {
        id: row.id,
        maneuver_type: row.draft.maneuver_type.label(),
        option: row.draft.option,
        option_value: row.draft.option_value,
        delta_velocity_km_s: effects.delta_velocity,
        delta_time_h: effects.delta_time,
        delta_mass_kg: effects.delta_mass,
    }
}
