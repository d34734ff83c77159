// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CellSelection, Solution};
use crate::configuration::{DefaultsPolicy, OptimizationMarkers};
use crate::driver::GenerationContext;
use crate::error::DeclarationError;
use crate::project::{ProjectDecl, ProjectId};
use crate::target::{Cell, DevEnv, Optimization, Platform, TargetMatrix};

fn declare(ctx: &mut GenerationContext, name: &str, matrix: TargetMatrix) -> ProjectId {
    ctx.declare_project(
        ProjectDecl::builder().name(name).with_matrix(matrix).build(),
        |_, _| {},
    )
    .unwrap()
}

fn win64_debug() -> Cell {
    Cell::new(Platform::WIN64, DevEnv::VS2022, Optimization::DEBUG)
}

#[test]
fn test_startup_requires_added_project() {
    let mut ctx = GenerationContext::new(DefaultsPolicy::default(), OptimizationMarkers::default());
    let id = declare(&mut ctx, "Playground", TargetMatrix::default_target());
    let project = ctx.project(id).unwrap();

    let mut solution = Solution::new("Playground", TargetMatrix::default_target());
    let err = solution.set_startup_project(project).unwrap_err();
    insta::assert_snapshot!(err, @"project 'Playground' is not part of solution 'Playground'");
    assert!(solution.startup_project().is_none());

    solution
        .add_project(project, CellSelection::All)
        .unwrap()
        .set_startup_project(project)
        .unwrap();
    assert_eq!(solution.startup_project(), Some(id));
    assert_eq!(solution.startup_entry().unwrap().name(), "Playground");
}

#[test]
fn test_add_project_all_cells() {
    let mut ctx = GenerationContext::default();
    let id = declare(&mut ctx, "hdef", TargetMatrix::default_target());

    let mut solution = Solution::new("Idaes", TargetMatrix::default_target());
    solution
        .add_project(ctx.project(id).unwrap(), CellSelection::All)
        .unwrap();

    let entry = solution.entry(id).unwrap();
    let expected: Vec<Cell> = TargetMatrix::default_target().cells().collect();
    assert_eq!(entry.cells(), expected.as_slice());
}

#[test]
fn test_add_project_cell_not_resolved() {
    let mut ctx = GenerationContext::default();
    let win32_only = TargetMatrix::new(
        Platform::WIN32,
        DevEnv::VS2022,
        Optimization::DEBUG | Optimization::RELEASE | Optimization::RETAIL,
    )
    .unwrap();
    let id = declare(&mut ctx, "hdef", win32_only);

    let mut solution = Solution::new("Idaes", TargetMatrix::default_target());
    let err = solution
        .add_project(ctx.project(id).unwrap(), CellSelection::All)
        .unwrap_err();

    assert!(matches!(err, DeclarationError::CellNotResolved { .. }));
    insta::assert_snapshot!(err, @"project 'hdef' has no configuration for cell win64|vs2022|debug");
    assert!(solution.entries().is_empty());
}

#[test]
fn test_add_project_cell_outside_solution() {
    let mut ctx = GenerationContext::default();
    let id = declare(&mut ctx, "hdef", TargetMatrix::default_target());
    let debug_only = TargetMatrix::new(Platform::WIN32, DevEnv::VS2022, Optimization::DEBUG).unwrap();

    let mut solution = Solution::new("Idaes", debug_only);
    let err = solution
        .add_project(ctx.project(id).unwrap(), CellSelection::Cells(vec![win64_debug()]))
        .unwrap_err();

    insta::assert_snapshot!(err, @"cell win64|vs2022|debug is not a target of solution 'Idaes'");
}

#[test]
fn test_add_project_twice_unions_cells() {
    let mut ctx = GenerationContext::default();
    let id = declare(&mut ctx, "hdef", TargetMatrix::default_target());
    let project = ctx.project(id).unwrap();
    let win64_retail = Cell::new(Platform::WIN64, DevEnv::VS2022, Optimization::RETAIL);

    let mut solution = Solution::new("Idaes", TargetMatrix::default_target());
    solution
        .add_project(project, CellSelection::Cells(vec![win64_debug(), win64_debug()]))
        .unwrap()
        .add_project(project, CellSelection::Cells(vec![win64_retail, win64_debug()]))
        .unwrap();

    assert_eq!(solution.entries().len(), 1);
    assert_eq!(solution.entry(id).unwrap().cells(), [win64_debug(), win64_retail]);
}

#[test]
fn test_entries_keep_insertion_order() {
    let mut ctx = GenerationContext::default();
    let hdef = declare(&mut ctx, "hdef", TargetMatrix::default_target());
    let playground = declare(&mut ctx, "Playground", TargetMatrix::default_target());

    let mut solution = Solution::new("Playground", TargetMatrix::default_target());
    solution
        .add_project(ctx.project(playground).unwrap(), CellSelection::All)
        .unwrap()
        .add_project(ctx.project(hdef).unwrap(), CellSelection::All)
        .unwrap();

    let names: Vec<&str> = solution.entries().iter().map(|e| e.name()).collect();
    assert_eq!(names, ["Playground", "hdef"]);
}

#[test]
fn test_empty_selection_adds_nothing() {
    let mut ctx = GenerationContext::default();
    let id = declare(&mut ctx, "Playground", TargetMatrix::default_target());
    let project = ctx.project(id).unwrap();

    let mut solution = Solution::new("Playground", TargetMatrix::default_target());
    solution
        .add_project(project, CellSelection::Cells(Vec::new()))
        .unwrap();
    assert!(solution.entries().is_empty());

    let err = solution.set_startup_project(project).unwrap_err();
    assert!(matches!(err, DeclarationError::UnknownProject { .. }));
    assert!(solution.startup_project().is_none());
}
