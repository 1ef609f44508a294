//! Recording selection policy

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rideup::files::select_recordings;

fn write_sized(dir: &Path, name: &str, bytes: usize) {
    let mut file = File::create(dir.join(name)).unwrap();
    file.write_all(&vec![b'x'; bytes]).unwrap();
}

#[test]
fn keeps_only_matching_files_above_the_size_cutoff() {
    let dir = tempfile::tempdir().unwrap();
    write_sized(dir.path(), "2024-01-01_a.fit", 10 * 1024);
    write_sized(dir.path(), "2024-01-01_b.fit", 1024);

    let names = select_recordings(dir.path(), "2024-01-01.*", Some(5 * 1024));
    assert_eq!(names, vec!["2024-01-01_a.fit"]);
}

#[test]
fn other_dates_never_leak_into_a_run() {
    let dir = tempfile::tempdir().unwrap();
    write_sized(dir.path(), "2024-01-01-07-00-00.fit", 8 * 1024);
    write_sized(dir.path(), "2024-01-01-18-30-00.fit", 8 * 1024);
    write_sized(dir.path(), "2024-01-02-07-00-00.fit", 8 * 1024);

    let names = select_recordings(dir.path(), r"2024-01-01.*\.fit", None);
    assert_eq!(
        names,
        vec!["2024-01-01-07-00-00.fit", "2024-01-01-18-30-00.fit"]
    );
}

#[test]
fn nonexistent_directory_yields_empty_without_panicking() {
    let names = select_recordings(Path::new("/no/such/dir"), "2024-01-01.*", Some(1));
    assert!(names.is_empty());
}
