//! Tests for command implementations.

use super::run::cmd_run;
use super::status::{PathReport, cmd_status};
use super::*;
use crate::cli::{RunArgs, StatusArgs};
use crate::locks::Classification;
use crate::test_support::{plant_record, record_exists};
use crate::token::LockToken;
use std::ffi::OsString;
use tempfile::TempDir;

fn test_config() -> Config {
    Config {
        user_name: Some("tester".to_string()),
        host_name: Some("testhost".to_string()),
        boot_time: BootTimeSource::Disabled,
    }
}

fn create_test_target() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("doc.txt");
    std::fs::write(&target, "shared document\n").unwrap();
    let lock_path = lock_path_for(&target).unwrap();
    (temp_dir, target, lock_path)
}

fn shell(script: &str, arg: &Path) -> Vec<OsString> {
    vec![
        OsString::from("sh"),
        OsString::from("-c"),
        OsString::from(script),
        arg.as_os_str().to_os_string(),
    ]
}

#[test]
fn test_report_summary_unlocked() {
    let report = PathReport::new(
        PathBuf::from("/srv/doc.txt"),
        PathBuf::from("/srv/.#doc.txt"),
        Classification::Unlocked,
    );
    assert_eq!(report.summary(), "/srv/doc.txt: unlocked");
}

#[test]
fn test_report_summary_self() {
    let report = PathReport::new(
        PathBuf::from("/srv/doc.txt"),
        PathBuf::from("/srv/.#doc.txt"),
        Classification::OwnedBySelf,
    );
    assert_eq!(report.summary(), "/srv/doc.txt: locked by this process");
}

#[test]
fn test_report_summary_other_holder() {
    let holder = LockToken::new("alice", "host1", 4242, Some(1_700_000_000));
    let report = PathReport::new(
        PathBuf::from("/srv/doc.txt"),
        PathBuf::from("/srv/.#doc.txt"),
        Classification::HeldByOther(holder),
    );
    assert_eq!(
        report.summary(),
        "/srv/doc.txt: locked by alice@host1 (pid 4242), host booted 2023-11-14 22:13:20 UTC"
    );
}

#[test]
fn test_report_json() {
    let holder = LockToken::new("bob", "otherhost", 99, None);
    let report = PathReport::new(
        PathBuf::from("/srv/doc.txt"),
        PathBuf::from("/srv/.#doc.txt"),
        Classification::HeldByOther(holder),
    );
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["state"], "locked_by_other");
    assert_eq!(json["lock_path"], "/srv/.#doc.txt");
    assert_eq!(json["holder"]["user"], "bob");
    assert_eq!(json["holder"]["pid"], 99);

    let report = PathReport::new(
        PathBuf::from("/srv/doc.txt"),
        PathBuf::from("/srv/.#doc.txt"),
        Classification::Unlocked,
    );
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["state"], "unlocked");
    assert!(json.get("holder").is_none());
}

#[test]
fn test_status_of_unlocked_path() {
    let (_temp_dir, target, _lock_path) = create_test_target();
    let args = StatusArgs {
        json: false,
        paths: vec![target],
    };
    assert_eq!(cmd_status(args, &test_config()).unwrap(), exit_codes::SUCCESS);
}

#[test]
fn test_status_of_malformed_record_fails() {
    let (_temp_dir, target, lock_path) = create_test_target();
    plant_record(&lock_path, "garbage");
    let args = StatusArgs {
        json: true,
        paths: vec![target],
    };
    let err = cmd_status(args, &test_config()).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::INVALID_RECORD);
}

#[test]
fn test_lock_path_rejects_path_without_file_name() {
    let args = LockPathArgs {
        paths: vec![PathBuf::from("/")],
    };
    assert!(matches!(cmd_lock_path(args), Err(ClashError::UserError(_))));
}

#[test]
fn test_lock_path_rejects_lock_record() {
    let args = LockPathArgs {
        paths: vec![PathBuf::from("/srv/.#doc.txt")],
    };
    let err = cmd_lock_path(args).unwrap_err();
    assert!(matches!(&err, ClashError::UserError(msg) if msg.contains("'/srv/doc.txt'")));
}

#[test]
fn test_status_rejects_lock_record() {
    let (_temp_dir, _target, lock_path) = create_test_target();
    let args = StatusArgs {
        json: false,
        paths: vec![lock_path.clone()],
    };
    let err = cmd_status(args, &test_config()).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    assert!(!record_exists(&lock_path));
}

#[cfg(unix)]
#[test]
fn test_run_holds_lock_while_command_runs() {
    let (_temp_dir, target, lock_path) = create_test_target();
    let args = RunArgs {
        take_over: false,
        path: target,
        command: shell("test -L \"$0\"", &lock_path),
    };

    assert_eq!(cmd_run(args, &test_config()).unwrap(), 0);
    assert!(!record_exists(&lock_path));
}

#[cfg(unix)]
#[test]
fn test_run_propagates_exit_code() {
    let (_temp_dir, target, lock_path) = create_test_target();
    let args = RunArgs {
        take_over: false,
        path: target,
        command: shell("exit 7", &lock_path),
    };

    assert_eq!(cmd_run(args, &test_config()).unwrap(), 7);
    assert!(!record_exists(&lock_path));
}

#[cfg(unix)]
#[test]
fn test_run_refuses_held_lock() {
    let (temp_dir, target, lock_path) = create_test_target();
    plant_record(&lock_path, "bob@otherhost.99");
    let marker = temp_dir.path().join("ran");
    let args = RunArgs {
        take_over: false,
        path: target,
        command: shell("touch \"$0\"", &marker),
    };

    let err = cmd_run(args, &test_config()).unwrap_err();
    assert!(matches!(&err, ClashError::LockHeld(owner) if owner == "bob@otherhost (pid 99)"));
    assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
    assert!(!marker.exists());
    assert!(record_exists(&lock_path));
}

#[cfg(unix)]
#[test]
fn test_run_takes_over_held_lock() {
    let (temp_dir, target, lock_path) = create_test_target();
    plant_record(&lock_path, "bob@otherhost.99");
    let marker = temp_dir.path().join("ran");
    let args = RunArgs {
        take_over: true,
        path: target,
        command: shell("touch \"$0\"", &marker),
    };

    assert_eq!(cmd_run(args, &test_config()).unwrap(), 0);
    assert!(marker.exists());
    assert!(!record_exists(&lock_path));
}

#[test]
fn test_run_missing_program_releases_lock() {
    let (_temp_dir, target, lock_path) = create_test_target();
    let args = RunArgs {
        take_over: false,
        path: target,
        command: vec![OsString::from("clashlock-test-no-such-program")],
    };

    let err = cmd_run(args, &test_config()).unwrap_err();
    assert!(err.to_string().contains("failed to run"));
    assert!(!record_exists(&lock_path));
}
