//! End-to-end leave/enter flows against a real on-disk store and config.

use uuid::Uuid;
use wayconf::ConfigFile;
use waymark::{Arrival, Departure, Host, LocationService};
use waystore::Position;

/// Test double for the hosting environment's capabilities.
#[derive(Default)]
struct RecordingHost {
    relocations: Vec<Position>,
    notices: Vec<String>,
}

impl Host for RecordingHost {
    fn relocate(&mut self, position: Position) {
        self.relocations.push(position);
    }

    fn notify(&mut self, text: &str) {
        self.notices.push(text.to_string());
    }
}

fn service_in(dir: &tempfile::TempDir) -> LocationService {
    let mut file = ConfigFile::open(dir.path().join("config.toml")).unwrap();
    file.config.paths.data_dir = dir.path().to_path_buf();
    LocationService::from_config(file)
}

fn user() -> String {
    Uuid::new_v4().to_string()
}

#[test]
fn leave_then_enter_restores_position() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let user = user();
    let position = Position::new(10.5, 64.0, -3.25, 90.0, 0.0);

    service.on_leave(Departure {
        user_id: &user,
        zone: "overworld",
        position,
    });

    let mut host = RecordingHost::default();
    service.on_enter(
        Arrival {
            user_id: &user,
            zone: "overworld",
        },
        &mut host,
    );

    assert_eq!(host.relocations, [position]);
    assert_eq!(host.notices.len(), 1);
    assert!(host.notices[0].contains("overworld"));
}

#[test]
fn excluded_zone_is_neither_saved_nor_restored() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);
    let user = user();

    service.policy_mut().add("void").unwrap();

    service.on_leave(Departure {
        user_id: &user,
        zone: "void",
        position: Position::new(1.0, 2.0, 3.0, 0.0, 0.0),
    });
    assert!(service.store().load(&user, "void").is_none());

    let mut host = RecordingHost::default();
    service.on_enter(
        Arrival {
            user_id: &user,
            zone: "void",
        },
        &mut host,
    );

    assert!(host.relocations.is_empty());
    assert_eq!(host.notices, ["Positions are not tracked in void."]);
}

#[test]
fn first_visit_gets_no_prior_location_notice() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let user = user();

    let mut host = RecordingHost::default();
    service.on_enter(
        Arrival {
            user_id: &user,
            zone: "nether",
        },
        &mut host,
    );

    assert!(host.relocations.is_empty());
    assert_eq!(host.notices, ["No saved position for nether yet."]);
}

#[test]
fn later_leave_overwrites_earlier_position() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let user = user();

    service.on_leave(Departure {
        user_id: &user,
        zone: "overworld",
        position: Position::new(1.0, 2.0, 3.0, 0.0, 0.0),
    });
    let latest = Position::new(-7.0, 80.0, 12.5, 270.0, 15.0);
    service.on_leave(Departure {
        user_id: &user,
        zone: "overworld",
        position: latest,
    });

    let mut host = RecordingHost::default();
    service.on_enter(
        Arrival {
            user_id: &user,
            zone: "overworld",
        },
        &mut host,
    );

    assert_eq!(host.relocations, [latest]);
}

#[test]
fn service_survives_store_close_between_events() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let user = user();
    let position = Position::new(10.5, 64.0, -3.25, 90.0, 0.0);

    service.on_leave(Departure {
        user_id: &user,
        zone: "overworld",
        position,
    });

    // Storage subsystem restart: the next event reconnects transparently.
    service.close();

    let mut host = RecordingHost::default();
    service.on_enter(
        Arrival {
            user_id: &user,
            zone: "overworld",
        },
        &mut host,
    );

    assert_eq!(host.relocations, [position]);
}

#[test]
fn custom_message_template_is_used_on_enter() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = ConfigFile::open(dir.path().join("config.toml")).unwrap();
    file.config.paths.data_dir = dir.path().to_path_buf();
    file.config.messages.no_prior_location = "First time in {zone}?".to_string();
    let service = LocationService::from_config(file);

    let mut host = RecordingHost::default();
    service.on_enter(
        Arrival {
            user_id: &user(),
            zone: "nether",
        },
        &mut host,
    );

    assert_eq!(host.notices, ["First time in nether?"]);
}

#[test]
fn malformed_user_id_never_creates_a_record() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    service.on_leave(Departure {
        user_id: "not-a-uuid",
        zone: "overworld",
        position: Position::new(1.0, 2.0, 3.0, 0.0, 0.0),
    });

    let mut host = RecordingHost::default();
    service.on_enter(
        Arrival {
            user_id: "not-a-uuid",
            zone: "overworld",
        },
        &mut host,
    );

    assert!(host.relocations.is_empty());
    assert_eq!(host.notices, ["No saved position for overworld yet."]);
}
