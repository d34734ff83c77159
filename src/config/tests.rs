// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader, ProjectOverride, ProjectSettings, TargetConfig};
use crate::configuration::CppStandard;
use crate::error::{ConfigError, HdnError};
use crate::logging::LogLevel;
use crate::project::Category;
use crate::target::TargetMatrix;

const PLAYGROUND: &str = r#"
[global]
dry = true
output_log_level = 4

[output]
directory = "out/solutions"

[defaults]
cpp_standard = "c++20"

[markers]
retail = "_HDN_SHIPPING"

[project]
defines = ["HDN_ENGINE"]

[projects.Playground]
category = "experimental"
dependencies = ["hdef"]

[projects."plugin_*"]
category = "plugin"
source_dir = "plugins"

[[solutions]]
name = "Playground"
projects = ["Playground"]
startup = "Playground"

[[solutions]]
name = "Tools"
projects = ["plugin_audio"]

[solutions.targets]
platforms = ["win64"]
environments = ["vs2022"]
optimizations = ["debug"]
"#;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(!config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.target, TargetConfig::default());
    assert_eq!(
        config.target.to_matrix("target").unwrap(),
        TargetMatrix::default_target()
    );
    assert!(config.solutions.is_empty());
    config.validate().unwrap();
}

#[test]
fn test_config_parse() {
    let config = Config::parse(PLAYGROUND).unwrap();

    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.output.directory.to_string_lossy(), "out/solutions");
    assert_eq!(config.defaults.cpp_standard, CppStandard::Cpp20);
    // Unset fields keep their defaults.
    assert_eq!(config.defaults.disabled_warnings, ["4201"]);
    assert_eq!(config.markers.retail, "_HDN_SHIPPING");
    assert_eq!(config.markers.debug, "_HDN_DEBUG");

    let names: Vec<&str> = config.solutions.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Playground", "Tools"]);
    assert_eq!(config.solutions[0].startup.as_deref(), Some("Playground"));

    let tools = config.solutions[1].targets.as_ref().unwrap();
    assert_eq!(tools.to_matrix("solutions.Tools.targets").unwrap().cell_count(), 1);
}

#[test]
fn test_project_settings_resolution() {
    let config = Config::parse(PLAYGROUND).unwrap();

    let playground = config.project_settings("Playground");
    assert_eq!(playground.category, Category::Experimental);
    assert_eq!(playground.dependencies, ["hdef"]);
    // Not overridden, so inherited from [project].
    assert_eq!(playground.defines, ["HDN_ENGINE"]);
    assert_eq!(playground.source_dir, "src");

    let plugin = config.project_settings("plugin_audio");
    assert_eq!(plugin.category, Category::Plugin);
    assert_eq!(plugin.source_dir, "plugins");

    let other = config.project_settings("hdef");
    assert_eq!(other, config.project);
}

#[test]
fn test_project_override_merge() {
    let config = Config {
        project: ProjectSettings {
            defines: vec!["A".to_string()],
            disabled_warnings: vec!["4100".to_string()],
            ..ProjectSettings::default()
        },
        projects: [(
            "hdef".to_string(),
            ProjectOverride {
                defines: Some(vec!["B".to_string()]),
                targets: Some(TargetConfig {
                    platforms: vec!["win64".to_string()],
                    ..TargetConfig::default()
                }),
                ..ProjectOverride::default()
            },
        )]
        .into_iter()
        .collect(),
        ..Config::default()
    };

    let settings = config.project_settings("hdef");
    // Lists are replaced, not appended.
    assert_eq!(settings.defines, ["B"]);
    assert_eq!(settings.disabled_warnings, ["4100"]);
    assert_eq!(settings.targets.unwrap().platforms, ["win64"]);
}

#[test]
fn test_invalid_axis_name_rejected() {
    let err = Config::parse("[target]\nplatforms = [\"arm64\"]\n").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: invalid value for 'platforms' in section '[target]': unknown value 'arm64', expected one of: win32, win64"
    );
}

#[test]
fn test_empty_axis_rejected() {
    let err = Config::parse("[target]\noptimizations = []\n").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"matrix error: invalid target matrix: the optimization level axis is empty"
    );
}

#[test]
fn test_startup_must_be_a_solution_project() {
    let toml = r#"
[[solutions]]
name = "Idaes"
projects = ["hdef"]
startup = "Playground"
"#;
    let err = Config::parse(toml).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: invalid value for 'startup' in section '[solutions.Idaes]': 'Playground' is not one of the solution's projects"
    );
}

#[test]
fn test_duplicate_solution_rejected() {
    let toml = r#"
[[solutions]]
name = "Idaes"

[[solutions]]
name = "Idaes"
"#;
    assert!(Config::parse(toml).is_err());
}

#[test]
fn test_unknown_field_rejected() {
    let err = Config::parse("[defaults]\nwarnings = [\"4201\"]\n").unwrap_err();
    match err {
        HdnError::Config(e) => assert!(matches!(*e, ConfigError::ParseError(_)), "{e}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_set_override_wins() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\ndry = false\n")
        .set("global.dry", true)
        .unwrap()
        .set("output.directory", "elsewhere")
        .unwrap()
        .build()
        .unwrap();

    assert!(config.global.dry);
    assert_eq!(config.output.directory.to_string_lossy(), "elsewhere");
}

#[test]
fn test_config_loader_format_loaded_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[global]\n dry = true")
        .add_toml_file_optional("/nonexistent/hdn.toml")
        .add_toml_str("[output]\n directory = \"out\"");

    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @r"
    1. [string] <string>
    2. [string] <string>
    ");
}

#[test]
fn test_missing_required_file() {
    let err = Config::from_file("/nonexistent/hedron.toml").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"config error: config file not found: /nonexistent/hedron.toml");
}

#[test]
fn test_required_file_is_listed_even_when_missing() {
    let loader = ConfigLoader::new()
        .add_toml_file("/nonexistent/hedron.toml")
        .add_toml_file_optional("/nonexistent/hdn.toml");

    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @"1. [file] /nonexistent/hedron.toml");
}

#[test]
fn test_format_options() {
    let options = Config::parse(PLAYGROUND).unwrap().format_options();
    let find = |key: &str| {
        options
            .iter()
            .find(|line| line.starts_with(key))
            .map(|line| line.split(" = ").nth(1).unwrap_or_default().to_string())
    };

    assert_eq!(find("defaults.cpp_standard").as_deref(), Some("c++20"));
    assert_eq!(find("defaults.exceptions").as_deref(), Some("/EHsc"));
    assert_eq!(find("markers.retail").as_deref(), Some("_HDN_SHIPPING"));
    assert_eq!(find("solutions").as_deref(), Some("Playground,Tools"));
    assert_eq!(find("target.platforms").as_deref(), Some("win32,win64"));

    let mut sorted = options.clone();
    sorted.sort();
    assert_eq!(options, sorted);
}

#[test]
fn test_markers_must_be_distinct() {
    let err = Config::parse("[markers]\nrelease = \"_HDN_DEBUG\"\n").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: invalid value for 'release' in section '[markers]': '_HDN_DEBUG' is already the debug marker"
    );
}

#[test]
fn test_marker_override_cannot_collide() {
    let err = ConfigLoader::new()
        .set("markers.retail", "_HDN_RELEASE")
        .unwrap()
        .build()
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: invalid value for 'retail' in section '[markers]': '_HDN_RELEASE' is already the release marker"
    );
}

#[test]
fn test_empty_marker_rejected() {
    let err = Config::parse("[markers]\ndebug = \" \"\n").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: invalid value for 'debug' in section '[markers]': marker define must not be empty"
    );
}

#[test]
fn test_solution_name_must_be_a_file_name() {
    for name in ["../escape", "nested/Poly", "win\\\\Poly", ".."] {
        let toml = format!("[[solutions]]\nname = \"{name}\"\nprojects = [\"hdef\"]\n");
        let err = Config::parse(&toml).unwrap_err();
        assert!(err.to_string().contains("is not a valid file name"), "{name}: {err}");
    }
}

#[test]
fn test_global_section_drives_logging() {
    let config = Config::default();
    let log = config.global.log_config();
    assert_eq!(log.console_level(), LogLevel::INFO);
    assert!(log.log_file().is_none());

    let config = ConfigLoader::new()
        .add_toml_str("[global]\noutput_log_level = 2\nfile_log_level = 4\n")
        .set("global.log_file", "logs/hdnmake.log")
        .unwrap()
        .build()
        .unwrap();
    let log = config.global.log_config();
    assert_eq!(log.console_level(), LogLevel::WARN);
    assert_eq!(log.file_level(), LogLevel::DEBUG);
    assert_eq!(log.log_file(), Some("logs/hdnmake.log"));
}
