use mission_designer::binding::{
    BackendError, BindingError, DetachedViews, InMemoryMission, ManeuverBackend, ManeuverCall,
    ManeuverSequenceController, ManeuverViewHost,
};
use mission_designer::maneuvers::{
    HohmannDirection, ManeuverDraft, ManeuverEffects, ManeuverRecord, ManeuverType,
};

fn record(maneuver_type: ManeuverType, option: u32, option_value: f64, dv: f64) -> ManeuverRecord {
    ManeuverRecord {
        draft: ManeuverDraft::new(maneuver_type, option, option_value),
        effects: ManeuverEffects {
            delta_velocity: dv,
            delta_time: 5.25,
            delta_mass: 120.0,
        },
    }
}

fn leo_to_geo() -> Vec<ManeuverRecord> {
    vec![
        record(
            ManeuverType::Hohmann,
            HohmannDirection::PeriapsisToApoapsis.option(),
            42_164.0,
            2.425,
        ),
        record(ManeuverType::PlaneChange, 0, 28.5, 1.474),
        record(ManeuverType::ApseLineRotation, 1, 30.0, 0.512),
    ]
}

#[test]
fn reload_mirrors_backend_sequence() {
    let records = leo_to_geo();
    let mut mission = InMemoryMission::new().with_maneuvers(records.clone());
    let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());

    let loaded = controller.reload().expect("reload");
    assert_eq!(loaded, 3);
    assert_eq!(controller.ids(), vec![1, 2, 3]);
    for ((_, id, row), expected) in controller.rows().zip(&records) {
        assert_eq!(row.id, id);
        assert_eq!(row.draft, expected.draft);
        assert_eq!(row.effects, Some(expected.effects));
    }

    drop(controller);
    assert!(
        mission.maneuver_calls().is_empty(),
        "reload must not mutate the backend"
    );
}

#[test]
fn reload_destroys_previous_views_last_first() {
    let mut mission = InMemoryMission::new().with_maneuvers(leo_to_geo());
    let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());

    controller.reload().expect("first reload");
    controller.reload().expect("second reload");

    assert_eq!(controller.len(), 3);
    assert_eq!(controller.host().created(), 6);
    assert_eq!(controller.host().destroyed_ids(), &[3, 2, 1]);
    assert_eq!(controller.host().live(), 3);
}

#[test]
fn add_appends_default_row_without_touching_backend() {
    let mut mission = InMemoryMission::new().with_maneuvers(leo_to_geo());
    let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());
    controller.reload().expect("reload");

    let handle = controller.add().expect("row created");
    assert_eq!(controller.id_of(handle), Some(4));
    let row = controller.get(handle).expect("row alive");
    assert_eq!(row.draft, ManeuverDraft::default());
    assert_eq!(row.draft.maneuver_type, ManeuverType::Hohmann);
    assert_eq!(row.effects, None);

    assert_eq!(controller.backend().maneuver_count(), 3);
    assert!(controller.backend().maneuver_calls().is_empty());
}

#[test]
fn reload_add_remove_commit_sends_remaining_rows_in_order() {
    let records = leo_to_geo();
    let mut mission = InMemoryMission::new().with_maneuvers(records[..2].iter().copied());
    {
        let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());
        controller.reload().expect("reload");
        controller.add().expect("row created");
        assert_eq!(controller.ids(), vec![1, 2, 3]);

        assert!(controller.remove_by_id(2));
        assert_eq!(controller.ids(), vec![1, 3]);
        assert_eq!(controller.host().destroyed_ids(), &[2]);

        let committed = controller.commit().expect("commit");
        assert_eq!(committed, 2);
    }

    assert_eq!(
        mission.maneuver_calls(),
        &[
            ManeuverCall::Clear,
            ManeuverCall::Add(records[0].draft),
            ManeuverCall::Add(ManeuverDraft::default()),
        ]
    );
    assert_eq!(mission.add_count(), 2);
    assert_eq!(mission.maneuvers().len(), 2);
    // effects are recomputed by the backend, never sent back
    assert_eq!(mission.maneuvers()[0], ManeuverRecord::from_draft(records[0].draft));
}

#[test]
fn removing_unknown_id_is_a_no_op() {
    let mut mission = InMemoryMission::new().with_maneuvers(leo_to_geo());
    let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());
    controller.reload().expect("reload");

    assert!(!controller.remove_by_id(7));
    assert!(!controller.remove_by_id(0));
    assert_eq!(controller.ids(), vec![1, 2, 3]);
    assert_eq!(controller.host().destroyed(), 0);
}

#[test]
fn duplicate_ids_resolve_to_the_first_row() {
    let records = leo_to_geo();
    let mut mission = InMemoryMission::new().with_maneuvers(records[1..].iter().copied());
    let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());
    controller.reload().expect("reload");

    assert!(controller.remove_by_id(1));
    let added = controller.add().expect("row created");
    assert_eq!(controller.ids(), vec![2, 2]);

    assert!(controller.remove_by_id(2));
    assert_eq!(controller.ids(), vec![2]);
    assert_eq!(controller.handle_of(2), Some(added));
    let survivor = controller.get(added).expect("added row survives");
    assert_eq!(survivor.draft, ManeuverDraft::default());
}

#[test]
fn handles_do_not_survive_reload() {
    let mut mission = InMemoryMission::new().with_maneuvers(leo_to_geo());
    let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());
    controller.reload().expect("reload");
    let stale = controller.handle_of(1).expect("row 1");

    controller.reload().expect("reload again");

    assert!(controller.get(stale).is_none());
    assert!(controller.get_mut(stale).is_none());
    assert_eq!(controller.id_of(stale), None);
    let fresh = controller.handle_of(1).expect("row 1 again");
    assert_ne!(fresh, stale);
}

#[test]
fn rows_whose_view_fails_are_skipped() {
    let records = leo_to_geo();
    let mut mission = InMemoryMission::new().with_maneuvers(records.clone());
    let mut controller =
        ManeuverSequenceController::new(&mut mission, DetachedViews::failing_on_attempts([2]));

    let loaded = controller.reload().expect("reload tolerates view failures");
    assert_eq!(loaded, 2);
    assert_eq!(controller.ids(), vec![1, 2]);
    let drafts: Vec<ManeuverDraft> = controller.rows().map(|(_, _, row)| row.draft).collect();
    assert_eq!(drafts, vec![records[0].draft, records[2].draft]);
    assert_eq!(controller.host().created(), 2);
}

#[test]
fn failed_add_creates_no_row() {
    let mut mission = InMemoryMission::new();
    let mut controller =
        ManeuverSequenceController::new(&mut mission, DetachedViews::failing_on_attempts([1]));

    assert_eq!(controller.add(), None);
    assert!(controller.is_empty());
    let handle = controller.add().expect("second attempt succeeds");
    assert_eq!(controller.id_of(handle), Some(1));
}

#[test]
fn edited_rows_are_committed_with_their_new_values() {
    let mut mission = InMemoryMission::new().with_maneuvers(leo_to_geo());
    {
        let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());
        controller.reload().expect("reload");
        let handle = controller.handle_of(3).expect("row 3");
        let row = controller.get_mut(handle).expect("row alive");
        row.draft = ManeuverDraft::new(
            ManeuverType::BiEllipticHohmann,
            HohmannDirection::ApoapsisToPeriapsis.option(),
            105_000.0,
        );
        controller.commit().expect("commit");
    }

    let types: Vec<ManeuverType> = mission
        .maneuvers()
        .iter()
        .map(|record| record.draft.maneuver_type)
        .collect();
    assert_eq!(
        types,
        vec![
            ManeuverType::Hohmann,
            ManeuverType::PlaneChange,
            ManeuverType::BiEllipticHohmann,
        ]
    );
    assert_eq!(mission.maneuvers()[2].draft.option, 1);
    assert_eq!(mission.maneuvers()[2].draft.option_value, 105_000.0);
}

#[test]
fn commit_of_empty_list_clears_backend() {
    let mut mission = InMemoryMission::new().with_maneuvers(leo_to_geo());
    let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());

    assert_eq!(controller.commit().expect("commit"), 0);
    assert_eq!(controller.backend().maneuver_calls(), &[ManeuverCall::Clear]);
    assert_eq!(controller.backend().maneuver_count(), 0);
}

#[test]
fn rejected_add_aborts_commit_without_rollback() {
    let mut mission = InMemoryMission::new()
        .with_maneuvers(leo_to_geo())
        .with_accept_limit(1);
    let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());
    controller.reload().expect("reload");

    let err = controller.commit().expect_err("second add is refused");
    assert!(matches!(
        err,
        BindingError::Backend(BackendError::Rejected {
            operation: "add_maneuver",
            ..
        })
    ));
    assert_eq!(controller.len(), 3, "local rows are kept");

    let (mission, host) = controller.into_parts();
    assert_eq!(host.live(), 0);
    assert_eq!(mission.maneuvers().len(), 1);
    assert_eq!(
        mission.maneuver_calls().len(),
        3,
        "clear, accepted add, refused add"
    );
}

#[test]
fn clear_destroys_every_view() {
    let mut mission = InMemoryMission::new().with_maneuvers(leo_to_geo());
    let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());
    controller.reload().expect("reload");

    assert_eq!(controller.clear(), 3);
    assert!(controller.is_empty());
    assert_eq!(controller.clear(), 0);
    assert_eq!(controller.backend().maneuver_count(), 3);
}

/// Backend whose second record cannot be read.
struct TruncatedBackend {
    records: Vec<ManeuverRecord>,
}

impl ManeuverBackend for TruncatedBackend {
    fn maneuver_count(&self) -> usize {
        self.records.len()
    }

    fn maneuver_at(&self, index: usize) -> Result<ManeuverRecord, BackendError> {
        if index == 1 {
            return Err(BackendError::Rejected {
                operation: "maneuver_at",
                reason: "record unavailable".to_string(),
            });
        }
        Ok(self.records[index])
    }

    fn clear_maneuvers(&mut self) -> Result<(), BackendError> {
        self.records.clear();
        Ok(())
    }

    fn add_maneuver(
        &mut self,
        maneuver_type: ManeuverType,
        option: u32,
        option_value: f64,
    ) -> Result<(), BackendError> {
        self.records.push(ManeuverRecord::from_draft(ManeuverDraft::new(
            maneuver_type,
            option,
            option_value,
        )));
        Ok(())
    }
}

#[test]
fn backend_read_failure_aborts_reload() {
    let backend = TruncatedBackend {
        records: leo_to_geo(),
    };
    let mut controller = ManeuverSequenceController::new(backend, DetachedViews::new());

    let err = controller.reload().expect_err("read failure surfaces");
    assert!(matches!(err, BindingError::Backend(BackendError::Rejected { .. })));
    assert_eq!(controller.ids(), vec![1]);
}

fn drafts_of<B, H>(controller: &ManeuverSequenceController<B, H>) -> Vec<ManeuverDraft>
where
    B: ManeuverBackend,
    H: ManeuverViewHost,
{
    controller
        .rows()
        .map(|(_, _, view)| controller.host().draft(view))
        .collect()
}

#[test]
fn reload_is_idempotent_for_an_unchanged_backend() {
    let mut mission = InMemoryMission::new().with_maneuvers(leo_to_geo());
    let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());

    controller.reload().expect("reload");
    let first = (controller.ids(), drafts_of(&controller));
    controller.reload().expect("reload again");
    let second = (controller.ids(), drafts_of(&controller));

    assert_eq!(first, second);
}

#[test]
fn repeated_add_numbers_rows_from_one() {
    let mut mission = InMemoryMission::new();
    let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());
    for _ in 0..5 {
        controller.add().expect("row created");
    }
    assert_eq!(controller.ids(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn committed_sequence_reloads_as_the_mirror() {
    let mut mission = InMemoryMission::new().with_maneuvers(leo_to_geo());
    let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());
    controller.reload().expect("reload");
    controller.add().expect("row created");
    assert!(controller.remove_by_id(1));
    let expected = drafts_of(&controller);

    controller.commit().expect("commit");
    controller.reload().expect("reload after commit");

    assert_eq!(drafts_of(&controller), expected);
    assert_eq!(controller.ids(), vec![1, 2, 3]);
}

#[test]
fn two_hohmann_rows_add_remove_commit() {
    let first = ManeuverDraft::new(
        ManeuverType::Hohmann,
        HohmannDirection::PeriapsisToApoapsis.option(),
        120.0,
    );
    let second = ManeuverDraft::new(
        ManeuverType::Hohmann,
        HohmannDirection::ApoapsisToPeriapsis.option(),
        300.0,
    );
    let mut mission = InMemoryMission::new()
        .with_maneuvers([first, second].map(ManeuverRecord::from_draft));
    {
        let mut controller = ManeuverSequenceController::new(&mut mission, DetachedViews::new());
        controller.reload().expect("reload");
        assert_eq!(controller.ids(), vec![1, 2]);
        let added = controller.add().expect("row created");
        assert_eq!(controller.id_of(added), Some(3));
        assert!(controller.remove_by_id(2));
        assert_eq!(controller.ids(), vec![1, 3]);
        controller.commit().expect("commit");
    }

    let adds: Vec<ManeuverDraft> = mission
        .maneuver_calls()
        .iter()
        .filter_map(|call| match call {
            ManeuverCall::Add(draft) => Some(*draft),
            ManeuverCall::Clear => None,
        })
        .collect();
    assert_eq!(adds, vec![first, ManeuverDraft::default()]);
}
