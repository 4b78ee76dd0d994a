//! End-to-end resolution over the committed monorepo fixture
//!
//! The fixture under `test-fixtures/trees/monorepo` is marked `root = true`
//! at its top, so nothing outside the checkout can leak into these results.

use cascade_core::{
    ConfigFile, DefaultConfig, FsConfigLoader, ResolverSettings, SessionCache, Source,
};
use cascade_fs::NormalizedPath;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/trees/monorepo")
        .join(relative)
}

fn cache() -> SessionCache {
    SessionCache::with_loader(
        Arc::new(FsConfigLoader::default()),
        DefaultConfig::Inline(Arc::new(ConfigFile::from_entries([
            ("license", "MIT"),
            ("style", "0"),
        ]))),
    )
}

#[test]
fn test_service_file_sees_whole_cascade() {
    let cache = cache();
    let run = Arc::new(());
    let file = fixture("services/api/src/handlers/users.x");

    assert_eq!(cache.try_get_value(&run, &file, "style").as_deref(), Some("4"));
    assert_eq!(
        cache.try_get_value(&run, &file, "severity.unused_import").as_deref(),
        Some("error")
    );
    assert_eq!(cache.try_get_value(&run, &file, "indent").as_deref(), Some("space"));
    assert_eq!(cache.try_get_value(&run, &file, "license").as_deref(), Some("MIT"));
    assert_eq!(cache.try_get_value(&run, &file, "unknown"), None);
}

#[test]
fn test_sibling_service_uses_shared_and_top_level_values() {
    let cache = cache();
    let run = Arc::new(());
    let file = fixture("services/worker/src/job.x");

    assert_eq!(cache.try_get_value(&run, &file, "style").as_deref(), Some("2"));
    assert_eq!(
        cache.try_get_value(&run, &file, "severity.unused_import").as_deref(),
        Some("warning")
    );
}

#[test]
fn test_vendored_code_is_cut_off_from_monorepo_settings() {
    let cache = cache();
    let run = Arc::new(());
    let file = fixture("vendor/thirdparty/lib/vendored.x");

    assert_eq!(cache.try_get_value(&run, &file, "style").as_deref(), Some("8"));
    assert_eq!(cache.try_get_value(&run, &file, "indent"), None);
    assert_eq!(cache.try_get_value(&run, &file, "license").as_deref(), Some("MIT"));
}

#[test]
fn test_broken_config_falls_through_to_ancestors() {
    let cache = cache();
    let run = Arc::new(());
    let file = fixture("tools/gen.x");

    // tools/.analyzerconfig is malformed, so its `style = 4` is not applied.
    assert_eq!(cache.try_get_value(&run, &file, "style").as_deref(), Some("2"));
}

#[test]
fn test_top_level_declaration_reports_its_directory() {
    let cache = cache();
    let hierarchy = cache.get_or_create(&Arc::new(()));
    let file = fixture("services/api/src/main.x");

    let resolved = hierarchy.resolve(&file, "naming.private_fields").unwrap();
    assert_eq!(resolved.value, "camel_case");
    assert_eq!(
        resolved.source,
        Source::Directory(NormalizedPath::new(fixture("")))
    );
}

#[test]
fn test_settings_with_default_file_on_disk() {
    let temp = tempfile::TempDir::new().unwrap();
    let default_path = temp.path().join("defaults.analyzerconfig");
    std::fs::write(&default_path, "license = Apache-2.0\n").unwrap();

    let cache = SessionCache::new(ResolverSettings {
        default_config: Some(default_path),
        ..ResolverSettings::default()
    });
    let run = Arc::new(());
    let file = fixture("services/api/src/main.x");

    assert_eq!(
        cache.try_get_value(&run, &file, "license").as_deref(),
        Some("Apache-2.0")
    );
    assert_eq!(cache.try_get_value(&run, &file, "style").as_deref(), Some("4"));
}
