// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::generate::ListArgs;
use crate::cmd::generate::build_context;
use crate::cmd::list::list_lines;
use crate::config::Config;
use crate::error::{DeclarationError, HdnError};

const HEDRON: &str = r#"
[projects.Playground]
category = "experimental"
dependencies = ["hdef"]
defines = ["HDN_PLAYGROUND"]

[projects.hdef]
category = "external"
disabled_warnings = ["4100"]

[[solutions]]
name = "Playground"
projects = ["Playground"]
startup = "Playground"

[[solutions]]
name = "Idaes"
projects = ["hdef"]
"#;

#[test]
fn test_build_context_declares_dependencies_first() {
    let config = Config::parse(HEDRON).unwrap();
    let ctx = build_context(&config).unwrap();

    let names: Vec<&str> = ctx.projects().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["hdef", "Playground"]);

    let playground = ctx.project_by_name("Playground").unwrap();
    assert_eq!(playground.configurations().len(), 6);
    let conf = &playground.configurations()[0];
    assert!(conf.has_define("HDN_PLAYGROUND"));
    assert!(conf.has_define("_HDN_DEBUG"));
    assert!(conf.disabled_warnings().contains("4201"));

    let hdef = ctx.project_by_name("hdef").unwrap();
    assert!(hdef.configurations()[0].disabled_warnings().contains("4100"));
}

#[test]
fn test_build_context_registers_solutions_in_file_order() {
    let config = Config::parse(HEDRON).unwrap();
    let ctx = build_context(&config).unwrap();

    let names: Vec<&str> = ctx.solutions().iter().map(|s| s.name()).collect();
    assert_eq!(names, ["Playground", "Idaes"]);

    let playground = &ctx.solutions()[0];
    let startup = playground.startup_entry().unwrap();
    assert_eq!(startup.name(), "Playground");
    // Dependencies are declared, not added to the solution.
    assert_eq!(playground.entries().len(), 1);
}

#[test]
fn test_build_context_registers_builtin_features() {
    let ctx = build_context(&Config::default()).unwrap();
    let lines = list_lines(
        &ListArgs {
            features: true,
            ..ListArgs::default()
        },
        &ctx,
    );
    assert_eq!(
        lines,
        [
            "light_config v1 = LightConfigAsset2",
            "scene_config v1 = SceneConfigAsset0"
        ]
    );
}

#[test]
fn test_dependency_cycle_detected() {
    let toml = r#"
[projects.a]
dependencies = ["b"]

[projects.b]
dependencies = ["a"]

[[solutions]]
name = "Loop"
projects = ["a"]
"#;
    let config = Config::parse(toml).unwrap();
    let err = build_context(&config).unwrap_err();

    match err.downcast_ref::<HdnError>() {
        Some(HdnError::Declaration(e)) => {
            assert_eq!(**e, DeclarationError::DependencyCycle("a -> b -> a".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_project_matrix_must_cover_solution() {
    let toml = r#"
[projects.hdef.targets]
platforms = ["win64"]

[[solutions]]
name = "Idaes"
projects = ["hdef"]
"#;
    let config = Config::parse(toml).unwrap();
    let err = build_context(&config).unwrap_err();
    insta::assert_snapshot!(err, @"project 'hdef' has no configuration for cell win32|vs2022|debug");
}

#[test]
fn test_list_lines() {
    let config = Config::parse(HEDRON).unwrap();
    let ctx = build_context(&config).unwrap();

    insta::assert_snapshot!(list_lines(&ListArgs::default(), &ctx).join("\n"), @r"
    Playground = Playground
    Idaes = hdef
    ");

    let projects = ListArgs {
        projects: true,
        ..ListArgs::default()
    };
    insta::assert_snapshot!(list_lines(&projects, &ctx).join("\n"), @r"
    hdef [external] 6 cells
    Playground [experimental] 6 cells
    ");
}

#[test]
fn test_list_lines_empty() {
    let ctx = build_context(&Config::default()).unwrap();
    assert_eq!(list_lines(&ListArgs::default(), &ctx), ["No solutions declared"]);
}
