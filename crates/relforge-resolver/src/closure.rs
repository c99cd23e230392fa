//! Dependency closure resolution.
//!
//! Given a set of root units and a map of explicit startup-mode overrides,
//! produces the complete, duplicate-free set of units the release must
//! contain, each with its resolved mode and included sub-units.

use std::collections::BTreeMap;
use std::collections::VecDeque;

use relforge_common::error::Result;
use relforge_common::types::{ResolvedSet, StartupMode, Unit, UnitName};

use crate::manifest::ManifestSource;

/// Resolves the transitive dependency closure of `roots`.
///
/// Roots are processed in the order given. Each unit is visited exactly
/// once: a name is inserted into the result before its dependencies are
/// explored, so cycles and self-dependencies terminate without
/// reprocessing. The override map is consulted for every unit, root or not;
/// a unit with no entry defaults to `permanent`.
///
/// An empty root set yields an empty result.
///
/// # Errors
///
/// Returns `ReleaseError::InvalidMode` if an override is outside the valid
/// mode set, or `ReleaseError::ManifestLoad` if a unit's manifest cannot be
/// loaded.
pub fn resolve(
    source: &dyn ManifestSource,
    roots: &[UnitName],
    overrides: &BTreeMap<UnitName, String>,
) -> Result<ResolvedSet> {
    let mut seen: ResolvedSet = BTreeMap::new();
    let mut frontier: VecDeque<UnitName> = roots.iter().cloned().collect();

    while let Some(name) = frontier.pop_front() {
        if seen.contains_key(&name) {
            continue;
        }

        let mode = match overrides.get(&name) {
            Some(raw) => StartupMode::parse_for_unit(&name, raw)?,
            Option::None => StartupMode::Permanent,
        };

        let manifest = source.load_manifest(&name)?;
        tracing::debug!(
            unit = %name,
            version = %manifest.version,
            mode = %mode,
            deps = manifest.dependencies.len(),
            "resolved unit"
        );

        for dep in &manifest.dependencies {
            if !seen.contains_key(dep) {
                frontier.push_back(dep.clone());
            }
        }

        let _ = seen.insert(
            name.clone(),
            Unit {
                name,
                version: manifest.version,
                mode,
                included_units: manifest.included_units,
                dependencies: manifest.dependencies,
            },
        );
    }

    tracing::info!(units = seen.len(), "closure resolved");
    Ok(seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::UnitManifest;

    use relforge_common::error::ReleaseError;

    /// In-memory manifest source for resolver tests.
    struct FakeSource {
        manifests: BTreeMap<String, UnitManifest>,
    }

    impl FakeSource {
        fn new(entries: &[(&str, &[&str])]) -> Self {
            let manifests = entries
                .iter()
                .map(|(name, deps)| {
                    (
                        (*name).to_owned(),
                        UnitManifest {
                            version: "1.0.0".into(),
                            dependencies: deps.iter().map(|d| (*d).to_owned()).collect(),
                            included_units: Vec::new(),
                        },
                    )
                })
                .collect();
            Self { manifests }
        }
    }

    impl ManifestSource for FakeSource {
        fn load_manifest(&self, unit: &str) -> Result<UnitManifest> {
            self.manifests
                .get(unit)
                .cloned()
                .ok_or_else(|| ReleaseError::ManifestLoad {
                    unit: unit.to_owned(),
                    message: "no such unit".into(),
                })
        }
    }

    fn no_overrides() -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    #[test]
    fn empty_roots_resolve_to_empty_set() {
        let source = FakeSource::new(&[]);
        let resolved = resolve(&source, &[], &no_overrides()).expect("resolve");
        assert!(resolved.is_empty());
    }

    #[test]
    fn single_unit_no_dependencies() {
        let source = FakeSource::new(&[("core", &[])]);
        let resolved = resolve(&source, &["core".into()], &no_overrides()).expect("resolve");
        assert_eq!(resolved.len(), 1);
        let core = &resolved["core"];
        assert_eq!(core.version, "1.0.0");
        assert_eq!(core.mode, StartupMode::Permanent);
        assert!(core.included_units.is_empty());
    }

    #[test]
    fn diamond_reaches_shared_dependency_once() {
        // A -> {B, C}, B -> {C}: C reachable via two paths, present once.
        let source = FakeSource::new(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
        let resolved = resolve(&source, &["a".into()], &no_overrides()).expect("resolve");
        assert_eq!(resolved.len(), 3);
        for unit in resolved.values() {
            assert_eq!(unit.mode, StartupMode::Permanent);
        }
    }

    #[test]
    fn cyclic_graph_terminates() {
        let source = FakeSource::new(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let resolved = resolve(&source, &["a".into()], &no_overrides()).expect("resolve");
        assert_eq!(resolved.len(), 3);
    }

    #[test]
    fn self_dependency_terminates() {
        let source = FakeSource::new(&[("selfish", &["selfish"])]);
        let resolved = resolve(&source, &["selfish".into()], &no_overrides()).expect("resolve");
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn override_applies_to_root() {
        let source = FakeSource::new(&[("tools", &[])]);
        let overrides = BTreeMap::from([("tools".to_owned(), "load".to_owned())]);
        let resolved = resolve(&source, &["tools".into()], &overrides).expect("resolve");
        assert_eq!(resolved["tools"].mode, StartupMode::Load);
    }

    #[test]
    fn override_applies_to_transitive_dependency() {
        let source = FakeSource::new(&[("app", &["debugger"]), ("debugger", &[])]);
        let overrides = BTreeMap::from([("debugger".to_owned(), "none".to_owned())]);
        let resolved = resolve(&source, &["app".into()], &overrides).expect("resolve");
        assert_eq!(resolved["app"].mode, StartupMode::Permanent);
        assert_eq!(resolved["debugger"].mode, StartupMode::None);
    }

    #[test]
    fn transitive_dependency_defaults_to_permanent() {
        let source = FakeSource::new(&[("app", &["dep"]), ("dep", &[])]);
        let overrides = BTreeMap::from([("app".to_owned(), "temporary".to_owned())]);
        let resolved = resolve(&source, &["app".into()], &overrides).expect("resolve");
        // The dependency does not inherit the requester's mode.
        assert_eq!(resolved["dep"].mode, StartupMode::Permanent);
    }

    #[test]
    fn invalid_mode_aborts_resolution() {
        let source = FakeSource::new(&[("core", &[])]);
        let overrides = BTreeMap::from([("core".to_owned(), "forever".to_owned())]);
        let err = resolve(&source, &["core".into()], &overrides).unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidMode { .. }), "got: {err}");
    }

    #[test]
    fn missing_manifest_aborts_resolution() {
        let source = FakeSource::new(&[("app", &["ghost"])]);
        let err = resolve(&source, &["app".into()], &no_overrides()).unwrap_err();
        match err {
            ReleaseError::ManifestLoad { unit, .. } => assert_eq!(unit, "ghost"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn multiple_roots_all_resolved() {
        let source = FakeSource::new(&[("web", &["http"]), ("http", &[]), ("cron", &[])]);
        let resolved =
            resolve(&source, &["web".into(), "cron".into()], &no_overrides()).expect("resolve");
        assert_eq!(resolved.len(), 3);
    }

    #[test]
    fn included_units_carried_through() {
        let mut source = FakeSource::new(&[]);
        let _ = source.manifests.insert(
            "bundle".into(),
            UnitManifest {
                version: "0.9.0".into(),
                dependencies: Vec::new(),
                included_units: vec!["bundle_extra".into()],
            },
        );
        let resolved = resolve(&source, &["bundle".into()], &no_overrides()).expect("resolve");
        assert_eq!(resolved["bundle"].included_units, vec!["bundle_extra"]);
    }
}
