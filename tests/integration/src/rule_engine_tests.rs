//! The resolver as a rule engine consumes it
//!
//! A host creates one options object per analysis run, hands it to worker
//! threads analysing files, and every rule asks the process-wide cache for
//! its settings keyed by that object.

use cascade_core::{DefaultConfig, SessionCache};
use cascade_test_utils::{ConfigTree, CountingLoader};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

/// Per-run options object the host owns; its identity is the session.
struct AnalyzerOptions {
    files: Vec<PathBuf>,
}

const RULES: [&str; 3] = ["unused_import", "naming", "line_length"];

/// Analyse every file on `workers` threads, returning the severity each
/// rule would report per file.
fn run_analysis(
    cache: &Arc<SessionCache>,
    options: &Arc<AnalyzerOptions>,
    workers: usize,
) -> BTreeMap<(String, String), String> {
    let results = Arc::new(Mutex::new(BTreeMap::new()));
    let chunk = options.files.len().div_ceil(workers).max(1);

    thread::scope(|scope| {
        for files in options.files.chunks(chunk) {
            let results = Arc::clone(&results);
            scope.spawn(move || {
                for file in files {
                    for rule in RULES {
                        let severity = cache
                            .try_get_value(options, file, &format!("severity.{rule}"))
                            .unwrap_or_else(|| "none".to_string());
                        let name = file.file_name().unwrap().to_string_lossy().to_string();
                        results
                            .lock()
                            .unwrap()
                            .insert((name, rule.to_string()), severity);
                    }
                }
            });
        }
    });

    Arc::try_unwrap(results).unwrap().into_inner().unwrap()
}

#[test]
fn test_parallel_run_resolves_every_rule_for_every_file() {
    let tree = ConfigTree::new()
        .with_config("project", "root = true\nseverity.naming = warning\n")
        .with_config("project/legacy", "severity.naming = none\nseverity.line_length = info\n");
    let files = vec![
        tree.file("project/src/a.x"),
        tree.file("project/src/b.x"),
        tree.file("project/legacy/old.x"),
    ];
    let cache = Arc::new(SessionCache::default());
    let options = Arc::new(AnalyzerOptions { files });

    let results = run_analysis(&cache, &options, 3);

    let get = |file: &str, rule: &str| results[&(file.to_string(), rule.to_string())].clone();
    assert_eq!(get("a.x", "naming"), "warning");
    assert_eq!(get("b.x", "line_length"), "none");
    assert_eq!(get("old.x", "naming"), "none");
    assert_eq!(get("old.x", "line_length"), "info");
    assert_eq!(get("old.x", "unused_import"), "none");
    assert_eq!(results.len(), 9);
}

#[test]
fn test_many_workers_share_one_load_per_directory() {
    let loader = Arc::new(
        CountingLoader::new()
            .with_dir("/ws", &[("root", "true"), ("severity.naming", "error")])
            .with_dir("/ws/src", &[("severity.unused_import", "warning")]),
    );
    let cache = Arc::new(SessionCache::with_loader(loader.clone(), DefaultConfig::None));
    let files = (0..40).map(|i| PathBuf::from(format!("/ws/src/file{i}.x"))).collect();
    let options = Arc::new(AnalyzerOptions { files });

    let results = run_analysis(&cache, &options, 8);

    assert_eq!(results.len(), 120);
    assert!(
        results
            .iter()
            .filter(|((_, rule), _)| rule == "naming")
            .all(|(_, severity)| severity == "error")
    );
    assert_eq!(loader.loads_of("/ws/src"), 1);
    assert_eq!(loader.loads_of("/ws"), 1);
    assert_eq!(loader.total_loads(), 2);
}

#[test]
fn test_consecutive_runs_do_not_accumulate_sessions() {
    let loader = Arc::new(CountingLoader::new().with_dir("/ws", &[("root", "true")]));
    let cache = Arc::new(SessionCache::with_loader(loader.clone(), DefaultConfig::None));

    for _ in 0..20 {
        let options = Arc::new(AnalyzerOptions {
            files: vec![PathBuf::from("/ws/main.x")],
        });
        run_analysis(&cache, &options, 1);
    }
    cache.purge();

    assert!(cache.is_empty());
    // Every run starts from a fresh snapshot of the directory.
    assert_eq!(loader.loads_of("/ws"), 20);
}
