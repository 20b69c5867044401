//! Backup rotation on disk.

mod support;

use chrono::{Local, TimeZone};
use support::workspace::Workspace;
use trading_peripheral::infrastructure::backup::{backup_file, backup_file_at, BackupPolicy};

#[test]
fn missing_document_takes_no_backup() {
    let workspace = Workspace::new();
    let taken = backup_file(&workspace.document(), &BackupPolicy::default()).unwrap();
    assert!(taken.is_none());
    assert_eq!(workspace.backup_count(), 0);
}

#[test]
fn backups_are_copies_next_to_the_document() {
    let workspace = Workspace::new();
    workspace.write_document("[General]\nheadless = True\n");

    let taken = backup_file(&workspace.document(), &BackupPolicy::default())
        .unwrap()
        .unwrap();

    assert_eq!(taken.parent(), Some(workspace.backups().as_path()));
    assert_eq!(
        std::fs::read_to_string(taken).unwrap(),
        "[General]\nheadless = True\n"
    );
}

#[test]
fn rotation_keeps_the_newest_copies() {
    let workspace = Workspace::new();
    workspace.write_document("[General]\n");
    let policy = BackupPolicy {
        number_of_backups: 2,
        directory: None,
    };

    let mut taken = Vec::new();
    for second in 0..4 {
        let now = Local.with_ymd_and_hms(2026, 1, 2, 3, 4, second).single().unwrap();
        taken.push(backup_file_at(&workspace.document(), &policy, now).unwrap().unwrap());
    }

    assert_eq!(workspace.backup_count(), 2);
    assert!(!taken[0].exists());
    assert!(!taken[1].exists());
    assert!(taken[2].exists());
    assert!(taken[3].exists());
}

#[test]
fn configured_directory_is_created() {
    let workspace = Workspace::new();
    workspace.write_document("[General]\n");
    let directory = workspace.root().join("elsewhere").join("copies");
    let policy = BackupPolicy {
        number_of_backups: 8,
        directory: Some(directory.clone()),
    };

    let taken = backup_file(&workspace.document(), &policy).unwrap().unwrap();

    assert!(taken.starts_with(&directory));
    assert_eq!(workspace.backup_count(), 0);
}
