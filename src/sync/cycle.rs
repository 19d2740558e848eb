use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::event_log::EventLog;

use super::error::SyncError;
use super::mirrorer::mirror;
use super::pruner::prune;
use super::report::CycleReport;

/// One full pass: prune the replica, then mirror the source onto it.
pub fn run_cycle<W: Write>(
    source_root: &Path,
    replica_root: &Path,
    log: &mut EventLog<W>,
) -> Result<CycleReport, SyncError> {
    let pruned = prune(source_root, replica_root, log)?;
    let mirrored = mirror(source_root, replica_root, log)?;
    log.info("Files synchronized successfully.");

    let report = pruned + mirrored;
    debug!("Cycle finished: {report:?}");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs::{self, File};
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;
    use walkdir::WalkDir;

    struct Trees {
        _dir: TempDir,
        source: PathBuf,
        replica: PathBuf,
    }

    fn trees() -> Trees {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let source = dir.path().join("source");
        let replica = dir.path().join("replica");
        fs::create_dir(&source).unwrap();
        fs::create_dir(&replica).unwrap();
        Trees {
            _dir: dir,
            source,
            replica,
        }
    }

    fn relative_paths(root: &Path) -> BTreeSet<PathBuf> {
        WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .map(|entry| {
                entry
                    .unwrap()
                    .path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_path_buf()
            })
            .collect()
    }

    fn assert_converged(trees: &Trees) {
        let source_paths = relative_paths(&trees.source);
        assert_eq!(source_paths, relative_paths(&trees.replica));
        for path in source_paths {
            let source = trees.source.join(&path);
            if source.is_file() {
                assert_eq!(
                    fs::read(&source).unwrap(),
                    fs::read(trees.replica.join(&path)).unwrap(),
                    "content differs for {}",
                    path.display()
                );
            }
        }
    }

    #[test]
    fn test_scenario_fresh_replica() {
        let trees = trees();
        fs::write(trees.source.join("a.txt"), "a").unwrap();
        fs::create_dir(trees.source.join("sub")).unwrap();
        fs::write(trees.source.join("sub/b.txt"), "b").unwrap();

        let mut log = EventLog::new(Vec::new());
        let report = run_cycle(&trees.source, &trees.replica, &mut log).unwrap();

        assert_converged(&trees);
        assert_eq!(report.copied_files, 2);
        assert_eq!(report.created_directories, 1);
        assert_eq!(
            log.entries().last().map(String::as_str),
            Some("INFO - Files synchronized successfully.")
        );
    }

    #[test]
    fn test_scenario_stale_replica() {
        let trees = trees();
        fs::write(trees.source.join("a.txt"), "a").unwrap();
        fs::write(trees.replica.join("a.txt"), "a").unwrap();
        fs::write(trees.replica.join("stale.txt"), "s").unwrap();
        fs::create_dir(trees.replica.join("old_dir")).unwrap();
        let t = SystemTime::now();
        for root in [&trees.source, &trees.replica] {
            File::options()
                .write(true)
                .open(root.join("a.txt"))
                .unwrap()
                .set_modified(t)
                .unwrap();
        }

        let mut log = EventLog::new(Vec::new());
        let report = run_cycle(&trees.source, &trees.replica, &mut log).unwrap();

        assert_converged(&trees);
        assert_eq!(report.copied_files, 0);
        assert_eq!(
            log.entries(),
            vec![
                format!(
                    "INFO - Removed directory {}",
                    trees.replica.join("old_dir").display()
                ),
                format!("INFO - Removed {}", trees.replica.join("stale.txt").display()),
                "INFO - Files synchronized successfully.".to_string(),
            ]
        );
    }

    #[test]
    fn test_second_cycle_is_a_no_op() {
        let trees = trees();
        fs::create_dir_all(trees.source.join("x/y")).unwrap();
        fs::write(trees.source.join("x/y/z.txt"), "z").unwrap();
        fs::write(trees.source.join("top.txt"), "t").unwrap();
        fs::write(trees.replica.join("extra.txt"), "e").unwrap();

        let mut log = EventLog::new(Vec::new());
        run_cycle(&trees.source, &trees.replica, &mut log).unwrap();

        let mut second_log = EventLog::new(Vec::new());
        let report = run_cycle(&trees.source, &trees.replica, &mut second_log).unwrap();

        assert_eq!(report.mutations(), 0);
        assert_eq!(
            second_log.entries(),
            vec!["INFO - Files synchronized successfully."]
        );
    }

    #[test]
    fn test_converges_after_source_changes() {
        let trees = trees();
        fs::create_dir_all(trees.source.join("keep/inner")).unwrap();
        fs::create_dir_all(trees.source.join("drop/inner")).unwrap();
        fs::write(trees.source.join("keep/inner/f.txt"), "v1").unwrap();
        fs::write(trees.source.join("drop/inner/g.txt"), "g").unwrap();

        let mut log = EventLog::new(Vec::new());
        run_cycle(&trees.source, &trees.replica, &mut log).unwrap();

        fs::remove_dir_all(trees.source.join("drop")).unwrap();
        fs::write(trees.source.join("keep/inner/f.txt"), "v2").unwrap();
        File::options()
            .write(true)
            .open(trees.source.join("keep/inner/f.txt"))
            .unwrap()
            .set_modified(SystemTime::now() + Duration::from_secs(10))
            .unwrap();
        fs::write(trees.source.join("new.txt"), "n").unwrap();

        let mut log = EventLog::new(Vec::new());
        let report = run_cycle(&trees.source, &trees.replica, &mut log).unwrap();

        assert_converged(&trees);
        assert_eq!(report.removed_directories, 1);
        assert_eq!(report.copied_files, 2);
    }

    #[test]
    fn test_fatal_error_skips_success_line() {
        let trees = trees();
        let missing = trees.replica.join("gone");

        let mut log = EventLog::new(Vec::new());
        let result = run_cycle(&trees.source, &missing, &mut log);

        assert!(result.is_err());
        assert!(log.entries().is_empty());
    }
}
