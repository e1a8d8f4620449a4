//! Export helpers for session snapshots.

pub mod snapshot {
    use serde::Serialize;
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// One displayed orbit widget and its value.
    #[derive(Debug, Clone, Serialize)]
    pub struct FieldValue<'a> {
        pub widget: &'a str,
        pub value: f64,
    }

    /// Every displayed orbit widget after a restore.
    #[derive(Debug, Clone, Serialize)]
    pub struct OrbitSnapshot<'a> {
        pub body: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub body_name: Option<&'a str>,
        pub representation: &'a str,
        pub fields: Vec<FieldValue<'a>>,
    }

    /// One row of the maneuver list.
    #[derive(Debug, Clone, Serialize)]
    pub struct ManeuverRow<'a> {
        pub id: u32,
        pub maneuver_type: &'a str,
        pub option: u32,
        pub option_value: f64,
        pub delta_velocity_km_s: f64,
        pub delta_time_h: f64,
        pub delta_mass_kg: f64,
    }

    /// Envelope written by [`write_json`].
    #[derive(Debug, Clone, Serialize)]
    pub struct SessionSnapshot<'a> {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub scenario: Option<&'a str>,
        pub orbit: OrbitSnapshot<'a>,
        pub maneuvers: Vec<ManeuverRow<'a>>,
    }

    /// Serialize the snapshot as pretty JSON followed by a newline.
    pub fn write_json(writer: &mut dyn Write, snapshot: &SessionSnapshot<'_>) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, snapshot).map_err(io::Error::other)?;
        writeln!(writer)?;
        writer.flush()
    }
}
