// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |            generate / list / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |          driver           |
//!              |  GenerationContext, emit  |
//!              '--+--------+--------+------'
//!                 |        |        |
//!                 v        v        v
//!             solution  project  feature
//!                 |        |      registry
//!                 +---+----+
//!                     v
//!              configuration
//!            defaults, markers
//!                     |
//!                     v
//!                  target
//!             Platform x DevEnv x Optimization
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod configuration;
pub mod driver;
pub mod emit;
pub mod error;
pub mod feature;
pub mod logging;
pub mod project;
pub mod solution;
pub mod target;
