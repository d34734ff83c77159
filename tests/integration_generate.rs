// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for generation.
//!
//! Declares a Hedron-like tree from TOML and emits it into a temporary
//! directory.

use hdn_make::cmd::generate::build_context;
use hdn_make::config::Config;
use hdn_make::driver::GenerationReport;
use hdn_make::emit::{DryRunEmitter, ManifestEmitter};

const HEDRON: &str = r#"
[project]
defines = ["HDN_ENGINE"]

[projects.hdef]
category = "module"

[projects.Playground]
category = "experimental"
dependencies = ["hdef"]

[projects."lightthorned*"]
dependencies = ["hdef"]

[[solutions]]
name = "Playground"
projects = ["Playground"]
startup = "Playground"

[[solutions]]
name = "Idaes"
projects = ["lightthorned", "hdef"]
startup = "lightthorned"

[[solutions]]
name = "Poly"
projects = ["hdef"]

[solutions.targets]
platforms = ["win64"]
optimizations = ["debug", "retail"]
"#;

fn manifest(dir: &std::path::Path, name: &str) -> serde_json::Value {
    let path = dir.join(format!("{name}.hdnsln.json"));
    let content = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&content).unwrap()
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn generate_every_solution() {
    let config = Config::parse(HEDRON).unwrap();
    let ctx = build_context(&config).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut emitter = ManifestEmitter::new(dir.path());

    let report: GenerationReport = ctx.generate_all(&mut emitter).collect();
    assert!(!report.has_failures());
    assert_eq!(report.outcomes().len(), 3);

    let playground = manifest(dir.path(), "Playground");
    assert_eq!(playground["startup_project"], "Playground");
    assert_eq!(playground["configurations"].as_array().unwrap().len(), 6);

    let project = &playground["projects"][0];
    assert_eq!(project["folder"], "experimental");
    assert_eq!(project["dependencies"], serde_json::json!(["hdef"]));

    let configurations = project["configurations"].as_array().unwrap();
    assert_eq!(configurations.len(), 6);
    for (conf, marker) in configurations
        .iter()
        .zip(["_HDN_DEBUG", "_HDN_RELEASE", "_HDN_RETAIL"].iter().cycle())
    {
        assert_eq!(conf["defines"], serde_json::json!(["HDN_ENGINE", marker]));
        assert_eq!(
            conf["options"],
            serde_json::json!(["/utf-8", "/EHsc", "/std:c++latest"])
        );
        assert_eq!(conf["disabled_warnings"], serde_json::json!(["4201"]));
    }
}

#[test]
fn solution_targets_restrict_cells() {
    let config = Config::parse(HEDRON).unwrap();
    let ctx = build_context(&config).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut emitter = ManifestEmitter::new(dir.path());

    let selected = ctx.select(&["Poly".to_string()]).unwrap();
    let report: GenerationReport = ctx.generate(selected, &mut emitter).collect();
    assert!(!report.has_failures());

    let poly = manifest(dir.path(), "Poly");
    assert!(poly["startup_project"].is_null());

    let cells: Vec<&str> = poly["configurations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|cell| cell["name"].as_str().unwrap())
        .collect();
    assert_eq!(cells, ["Debug", "Retail"]);

    let hdef = &poly["projects"][0];
    assert_eq!(hdef["configurations"].as_array().unwrap().len(), 2);
    assert!(!dir.path().join("Playground.hdnsln.json").exists());
}

#[test]
fn glob_override_applies_to_matching_projects() {
    let config = Config::parse(HEDRON).unwrap();
    let ctx = build_context(&config).unwrap();

    let lightthorned = ctx.project_by_name("lightthorned").unwrap();
    assert_eq!(lightthorned.dependencies(), ["hdef".to_string()]);

    let names: Vec<&str> = ctx.projects().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["hdef", "Playground", "lightthorned"]);
}

#[test]
fn manifests_are_reproducible() {
    let config = Config::parse(HEDRON).unwrap();
    let first_dir = tempfile::tempdir().unwrap();
    let second_dir = tempfile::tempdir().unwrap();

    for dir in [first_dir.path(), second_dir.path()] {
        let ctx = build_context(&config).unwrap();
        let mut emitter = ManifestEmitter::new(dir);
        let report: GenerationReport = ctx.generate_all(&mut emitter).collect();
        assert!(!report.has_failures());
    }

    for name in ["Playground", "Idaes", "Poly"] {
        let file = format!("{name}.hdnsln.json");
        let first = std::fs::read(first_dir.path().join(&file)).unwrap();
        let second = std::fs::read(second_dir.path().join(&file)).unwrap();
        assert_eq!(first, second, "{file} differs between runs");
    }
}

#[test]
fn dry_run_writes_nothing() {
    let config = Config::parse(HEDRON).unwrap();
    let ctx = build_context(&config).unwrap();
    let mut emitter = DryRunEmitter;

    let report: GenerationReport = ctx.generate_all(&mut emitter).collect();
    insta::assert_snapshot!(report.summary().join("\n"), @r"
    ok     Playground (0 artifacts)
    ok     Idaes (0 artifacts)
    ok     Poly (0 artifacts)
    ");
}

#[test]
fn emission_failure_is_reported_per_solution() {
    let config = Config::parse(HEDRON).unwrap();
    let ctx = build_context(&config).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocked");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut emitter = ManifestEmitter::new(&blocker);
    let report: GenerationReport = ctx.generate_all(&mut emitter).collect();

    assert_eq!(report.outcomes().len(), 3);
    assert_eq!(report.failures().count(), 3);
}
