//! Transitive resolution of registry dependencies
//!
//! Given a list of requested component names, this module walks
//! `registryDependencies` edges through the catalog and produces the full
//! ordered set of components to install, plus the union of external package
//! dependencies they declare.
//!
//! Resolution is best effort: a name that cannot be fetched (missing,
//! invalid, registry down) is recorded as unresolved and skipped, and the
//! rest of the graph still resolves. A user adding five components should
//! not lose all five because one dependency name went stale.
//!
//! # Examples
//!
//! ```no_run
//! use dashkit::{resolve, FileRegistryClient, RegistryClient};
//!
//! let registry = RegistryClient::File(FileRegistryClient::new("./registry"));
//! let result = resolve(&["kpi-card".to_string()], &registry);
//!
//! for item in &result.resolved {
//!     println!("will install {}", item.name);
//! }
//! for warn in &result.unresolved {
//!     eprintln!("could not resolve {}: {}", warn.name, warn.reason);
//! }
//! ```

use crate::{CatalogItem, RegistryClient};
use std::collections::{BTreeSet, HashSet};

/// Everything one resolution run produced
///
/// `resolved` is in first-visit order: a requested component comes before
/// the dependencies discovered through it, and a name shared by several
/// components appears exactly once, at the position it was first reached.
#[derive(Debug, Default)]
pub struct ResolutionResult {
    /// Components to install, first-visit order, no duplicate names
    pub resolved: Vec<CatalogItem>,
    /// Union of package, dev and peer dependencies across `resolved`
    pub package_dependencies: BTreeSet<String>,
    /// Every name reachable as a registry dependency, resolvable or not
    pub registry_dependency_names: BTreeSet<String>,
    /// Names that were reached but could not be fetched
    pub unresolved: Vec<UnresolvedItem>,
}

/// A name the resolver reached but could not turn into a catalog item
#[derive(Debug, Clone)]
pub struct UnresolvedItem {
    pub name: String,
    /// True when the user asked for this name directly, false for a
    /// transitive registry dependency
    pub requested: bool,
    pub reason: String,
}

/// Resolve the transitive closure of registry dependencies
///
/// Each name is attempted at most once per call: a component is marked
/// visited before its fetch, so dependency cycles (including a component
/// depending on itself) terminate and nothing is fetched twice. Fetch
/// failures never abort the run; they land in
/// [`ResolutionResult::unresolved`].
pub fn resolve(requested: &[String], registry: &RegistryClient) -> ResolutionResult {
    let mut visited = HashSet::new();
    let mut result = ResolutionResult::default();

    for name in requested {
        process_component(name, true, registry, &mut visited, &mut result);
    }

    result
}

fn process_component(
    name: &str,
    requested: bool,
    registry: &RegistryClient,
    visited: &mut HashSet<String>,
    result: &mut ResolutionResult,
) {
    // Mark before fetching so cycles back to this name are no-ops
    if !visited.insert(name.to_string()) {
        return;
    }

    let item = match registry.get_item(name) {
        Ok(item) => item,
        Err(e) => {
            tracing::warn!("skipping component '{}': {}", name, e);
            result.unresolved.push(UnresolvedItem {
                name: name.to_string(),
                requested,
                reason: e.to_string(),
            });
            return;
        }
    };

    for dep in item
        .package_dependencies
        .iter()
        .chain(item.package_dev_dependencies.iter())
        .chain(item.package_peer_dependencies.iter())
    {
        result.package_dependencies.insert(dep.clone());
    }

    let registry_deps = item.registry_dependencies.clone();
    result.resolved.push(item);

    for dep_name in registry_deps {
        result.registry_dependency_names.insert(dep_name.clone());
        process_component(&dep_name, false, registry, visited, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry_http::HttpRegistryClient;
    use crate::{FileRegistryClient, ItemFile, ItemKind};
    use std::fs;
    use tempfile::TempDir;

    /// Helper to build a catalog item for fixtures
    fn make_item(
        name: &str,
        registry_deps: &[&str],
        package_deps: &[&str],
    ) -> CatalogItem {
        CatalogItem {
            name: name.to_string(),
            kind: ItemKind::Ui,
            category: None,
            subcategory: None,
            description: format!("{} test component", name),
            package_dependencies: package_deps.iter().map(|s| s.to_string()).collect(),
            package_dev_dependencies: Vec::new(),
            package_peer_dependencies: Vec::new(),
            registry_dependencies: registry_deps.iter().map(|s| s.to_string()).collect(),
            files: vec![ItemFile {
                relative_name: format!("{}.tsx", name),
                content: format!("// {}", name),
            }],
            meta: None,
        }
    }

    /// Helper to write items into an on-disk registry layout
    fn make_registry(items: &[CatalogItem]) -> (TempDir, RegistryClient) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("components")).unwrap();
        fs::write(
            dir.path().join("index.json"),
            serde_json::to_string(items).unwrap(),
        )
        .unwrap();
        for item in items {
            fs::write(
                dir.path().join("components").join(format!("{}.json", item.name)),
                serde_json::to_string(item).unwrap(),
            )
            .unwrap();
        }
        let client = RegistryClient::File(FileRegistryClient::new(dir.path()));
        (dir, client)
    }

    fn names(result: &ResolutionResult) -> Vec<&str> {
        result.resolved.iter().map(|i| i.name.as_str()).collect()
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    // ============================================================================
    // Basic traversal
    // ============================================================================

    #[test]
    fn test_resolve_single_item_no_deps() {
        let (_dir, registry) = make_registry(&[make_item("badge", &[], &[])]);

        let result = resolve(&strings(&["badge"]), &registry);

        assert_eq!(names(&result), vec!["badge"]);
        assert!(result.package_dependencies.is_empty());
        assert!(result.registry_dependency_names.is_empty());
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn test_resolve_dependency_follows_requester() {
        let (_dir, registry) = make_registry(&[
            make_item("kpi-card", &["bar-chart"], &["lucide"]),
            make_item("bar-chart", &[], &["recharts"]),
        ]);

        let result = resolve(&strings(&["kpi-card"]), &registry);

        assert_eq!(names(&result), vec!["kpi-card", "bar-chart"]);
        assert_eq!(
            result.package_dependencies.iter().collect::<Vec<_>>(),
            vec!["lucide", "recharts"]
        );
        assert!(result
            .registry_dependency_names
            .contains("bar-chart"));
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn test_resolve_deep_chain() {
        let (_dir, registry) = make_registry(&[
            make_item("dashboard-grid", &["kpi-card"], &[]),
            make_item("kpi-card", &["sparkline"], &[]),
            make_item("sparkline", &[], &[]),
        ]);

        let result = resolve(&strings(&["dashboard-grid"]), &registry);

        assert_eq!(
            names(&result),
            vec!["dashboard-grid", "kpi-card", "sparkline"]
        );
    }

    #[test]
    fn test_resolve_duplicate_request_resolves_once() {
        let (_dir, registry) = make_registry(&[make_item("badge", &[], &[])]);

        let result = resolve(&strings(&["badge", "badge"]), &registry);

        assert_eq!(names(&result), vec!["badge"]);
    }

    // ============================================================================
    // Deduplication and ordering
    // ============================================================================

    #[test]
    fn test_resolve_shared_dependency_appears_once() {
        // Both requesters need "tooltip"; it lands at its first-visit
        // position, between the two requesters
        let (_dir, registry) = make_registry(&[
            make_item("area-chart", &["tooltip"], &[]),
            make_item("pie-chart", &["tooltip"], &[]),
            make_item("tooltip", &[], &[]),
        ]);

        let result = resolve(&strings(&["area-chart", "pie-chart"]), &registry);

        assert_eq!(names(&result), vec!["area-chart", "tooltip", "pie-chart"]);
    }

    #[test]
    fn test_resolve_package_dependency_union() {
        let (_dir, registry) = make_registry(&[
            make_item("area-chart", &[], &["recharts", "date-fns"]),
            make_item("pie-chart", &[], &["recharts"]),
        ]);

        let result = resolve(&strings(&["area-chart", "pie-chart"]), &registry);

        assert_eq!(
            result.package_dependencies.iter().collect::<Vec<_>>(),
            vec!["date-fns", "recharts"]
        );
    }

    #[test]
    fn test_resolve_unions_dev_and_peer_dependencies() {
        let mut item = make_item("data-table", &[], &["tanstack-table"]);
        item.package_dev_dependencies = vec!["msw".to_string()];
        item.package_peer_dependencies = vec!["react".to_string()];
        let (_dir, registry) = make_registry(&[item]);

        let result = resolve(&strings(&["data-table"]), &registry);

        assert_eq!(
            result.package_dependencies.iter().collect::<Vec<_>>(),
            vec!["msw", "react", "tanstack-table"]
        );
    }

    #[test]
    fn test_resolve_order_is_deterministic() {
        let (_dir, registry) = make_registry(&[
            make_item("filter-bar", &["date-picker", "select"], &[]),
            make_item("date-picker", &[], &[]),
            make_item("select", &[], &[]),
        ]);

        let first = resolve(&strings(&["filter-bar"]), &registry);
        let second = resolve(&strings(&["filter-bar"]), &registry);

        assert_eq!(names(&first), names(&second));
        assert_eq!(names(&first), vec!["filter-bar", "date-picker", "select"]);
    }

    // ============================================================================
    // Cycles
    // ============================================================================

    #[test]
    fn test_resolve_mutual_cycle_terminates() {
        let (_dir, registry) = make_registry(&[
            make_item("tabs", &["tab-panel"], &[]),
            make_item("tab-panel", &["tabs"], &[]),
        ]);

        let result = resolve(&strings(&["tabs"]), &registry);

        assert_eq!(names(&result), vec!["tabs", "tab-panel"]);
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn test_resolve_self_cycle_resolves_once() {
        let (_dir, registry) = make_registry(&[make_item("accordion", &["accordion"], &[])]);

        let result = resolve(&strings(&["accordion"]), &registry);

        assert_eq!(names(&result), vec!["accordion"]);
    }

    // ============================================================================
    // Unresolvable names
    // ============================================================================

    #[test]
    fn test_resolve_missing_transitive_dep_is_non_fatal() {
        let (_dir, registry) = make_registry(&[make_item("kpi-card", &["ghost"], &[])]);

        let result = resolve(&strings(&["kpi-card"]), &registry);

        assert_eq!(names(&result), vec!["kpi-card"]);
        assert!(result.registry_dependency_names.contains("ghost"));
        assert_eq!(result.unresolved.len(), 1);
        assert_eq!(result.unresolved[0].name, "ghost");
        assert!(!result.unresolved[0].requested);
    }

    #[test]
    fn test_resolve_missing_requested_name_keeps_siblings() {
        let (_dir, registry) = make_registry(&[make_item("badge", &[], &[])]);

        let result = resolve(&strings(&["ghost", "badge"]), &registry);

        assert_eq!(names(&result), vec!["badge"]);
        assert_eq!(result.unresolved.len(), 1);
        assert_eq!(result.unresolved[0].name, "ghost");
        assert!(result.unresolved[0].requested);
        assert!(!result.unresolved[0].reason.is_empty());
    }

    #[test]
    fn test_resolve_failure_mid_graph_keeps_later_deps() {
        // badge -> [ghost, tooltip]: the dead name must not stop tooltip
        let (_dir, registry) = make_registry(&[
            make_item("badge", &["ghost", "tooltip"], &[]),
            make_item("tooltip", &[], &[]),
        ]);

        let result = resolve(&strings(&["badge"]), &registry);

        assert_eq!(names(&result), vec!["badge", "tooltip"]);
        assert_eq!(result.unresolved.len(), 1);
        assert_eq!(result.unresolved[0].name, "ghost");
    }

    #[test]
    fn test_resolve_timed_out_fetch_is_non_fatal() {
        // A socket that accepts but never answers: the fetch times out
        // and the name lands in unresolved instead of aborting the run
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let registry = RegistryClient::Http(HttpRegistryClient::new(url, 1).unwrap());

        let result = resolve(&strings(&["badge"]), &registry);

        assert!(result.resolved.is_empty());
        assert_eq!(result.unresolved.len(), 1);
        assert_eq!(result.unresolved[0].name, "badge");
        assert!(result.unresolved[0].requested);
        assert!(result.unresolved[0].reason.contains("timed out"));
    }
}
