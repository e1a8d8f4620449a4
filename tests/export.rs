use mission_designer::binding::{InMemoryOrbit, OrbitSlot, StateRepresentationMapper};
use mission_designer::export::snapshot::{
    FieldValue, ManeuverRow, OrbitSnapshot, SessionSnapshot, write_json, writer_for_path,
};
use mission_designer::orbits::FieldLayout;
use tempfile::tempdir;

fn session<'a>(fields: Vec<FieldValue<'a>>) -> SessionSnapshot<'a> {
    SessionSnapshot {
        scenario: Some("LEO to GEO"),
        orbit: OrbitSnapshot {
            body: 3,
            body_name: Some("EARTH"),
            representation: "keplerian",
            fields,
        },
        maneuvers: vec![ManeuverRow {
            id: 1,
            maneuver_type: "hohmann",
            option: 0,
            option_value: 42_164.0,
            delta_velocity_km_s: 3.893,
            delta_time_h: 5.256,
            delta_mass_kg: 1_250.0,
        }],
    }
}

#[test]
fn snapshot_json_lists_every_widget() {
    let mut orbit = InMemoryOrbit::new(OrbitSlot::Departure);
    let layout = FieldLayout::prefixed("departure");
    let restored = StateRepresentationMapper::new(&mut orbit, layout.clone()).restore_all();
    let fields = restored
        .display(&layout)
        .into_iter()
        .map(|(widget, value)| FieldValue { widget, value })
        .collect();

    let mut buffer = Vec::new();
    write_json(&mut buffer, &session(fields)).expect("serialize");
    let text = String::from_utf8(buffer).expect("utf8");
    assert!(text.ends_with("}\n"));

    let json: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(json["scenario"], "LEO to GEO");
    assert_eq!(json["orbit"]["body_name"], "EARTH");
    let fields = json["orbit"]["fields"].as_array().expect("fields array");
    assert_eq!(fields.len(), 18);
    assert_eq!(fields[0]["widget"], "departure_x");
    assert_eq!(fields[17]["widget"], "departure_true_anomaly_2");
    assert_eq!(json["maneuvers"][0]["maneuver_type"], "hohmann");
}

#[test]
fn absent_names_are_omitted() {
    let mut snapshot = session(Vec::new());
    snapshot.scenario = None;
    snapshot.orbit.body_name = None;

    let mut buffer = Vec::new();
    write_json(&mut buffer, &snapshot).expect("serialize");
    let json: serde_json::Value = serde_json::from_slice(&buffer).expect("valid json");
    assert!(json.get("scenario").is_none());
    assert!(json["orbit"].get("body_name").is_none());
}

#[test]
fn file_writer_creates_parent_directories() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("exports/session.json");
    {
        let mut writer = writer_for_path(&path).expect("writer");
        write_json(&mut writer, &session(Vec::new())).expect("serialize");
    }
    let contents = std::fs::read_to_string(&path).expect("read back");
    assert!(contents.contains("\"maneuvers\""));
}
