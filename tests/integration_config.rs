// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::path::PathBuf;

use hdn_make::cmd::generate::build_context;
use hdn_make::config::{Config, ConfigLoader, LOCAL_CONFIG_FILE};
use hdn_make::project::Category;

fn repo_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(LOCAL_CONFIG_FILE)
}

// =============================================================================
// Repository configuration
// =============================================================================

#[test]
fn repo_config_declares_every_solution() {
    let config = Config::from_file(repo_config()).unwrap();
    let ctx = build_context(&config).unwrap();

    let names: Vec<&str> = ctx.solutions().iter().map(|s| s.name()).collect();
    assert_eq!(names, ["Idaes", "Ideon", "Poly", "Playground", "AllSharpmake"]);

    let poly = &ctx.solutions()[2];
    assert_eq!(poly.targets().cell_count(), 3);
    assert!(poly.startup_entry().is_none());

    let all = &ctx.solutions()[4];
    assert_eq!(all.entries().len(), ctx.projects().len());

    let solution = &ctx.solutions()[3];
    assert_eq!(solution.name(), "Playground");
    assert_eq!(solution.startup_entry().unwrap().name(), "Playground");
    assert_eq!(solution.targets().cell_count(), 6);

    let playground = ctx.project_by_name("Playground").unwrap();
    assert_eq!(playground.category(), Category::Experimental);
    assert_eq!(
        ctx.project_by_name("vkplayground").unwrap().category(),
        Category::Experimental
    );
    assert_eq!(ctx.project_by_name("hdef").unwrap().category(), Category::Module);
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn later_files_override_earlier_files() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.toml");
    let local = dir.path().join("local.toml");
    std::fs::write(&base, "[global]\ndry = true\n\n[markers]\nretail = \"_HDN_SHIP\"\n").unwrap();
    std::fs::write(&local, "[markers]\nretail = \"_HDN_FINAL\"\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file_optional(&local)
        .add_toml_file_optional(dir.path().join("missing.toml"));
    assert_eq!(loader.format_loaded_files().len(), 2);

    let config = loader.build().unwrap();
    assert!(config.global.dry);
    assert_eq!(config.markers.retail, "_HDN_FINAL");
    assert_eq!(config.markers.debug, "_HDN_DEBUG");
}

#[test]
fn custom_markers_reach_configurations() {
    let toml = r#"
[markers]
retail = "_HDN_SHIPPING"

[[solutions]]
name = "Poly"
projects = ["hdef"]
"#;
    let config = Config::parse(toml).unwrap();
    let ctx = build_context(&config).unwrap();
    let hdef = ctx.project_by_name("hdef").unwrap();

    let retail: Vec<bool> = hdef
        .configurations()
        .iter()
        .filter(|conf| conf.cell().configuration_name() == "Retail")
        .map(|conf| conf.has_define("_HDN_SHIPPING") && !conf.has_define("_HDN_RETAIL"))
        .collect();
    assert_eq!(retail, [true, true]);
}

#[test]
fn defaults_policy_is_configurable() {
    let toml = r#"
[defaults]
exceptions = "disable"
cpp_standard = "c++17"
additional_options = ["/utf-8", "/permissive-"]

[[solutions]]
name = "Poly"
projects = ["hdef"]
"#;
    let config = Config::parse(toml).unwrap();
    let ctx = build_context(&config).unwrap();
    let conf = &ctx.project_by_name("hdef").unwrap().configurations()[0];

    insta::assert_snapshot!(
        conf.command_line().join(" "),
        @"/utf-8 /permissive- /EHs-c- /std:c++17 /D_HDN_DEBUG /wd4201"
    );
}
