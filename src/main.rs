// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!                    |          ^
//!                    +- error --+ CLI flags only
//!   Generate | List | Options | Inis | Version
//! ```

use std::process::ExitCode;

use hdn_make::cli::global::GlobalOptions;
use hdn_make::cli::{self, Command};
use hdn_make::cmd::config::{run_inis_command, run_options_command};
use hdn_make::cmd::generate::run_generate_command;
use hdn_make::cmd::list::run_list_command;
use hdn_make::config::loader::ConfigLoader;
use hdn_make::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use hdn_make::logging::init_logging;
use hdn_make::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();
    let config = load_config(&cli.global);

    let log_config = config
        .as_ref()
        .map_or_else(|_| build_log_config(&cli.global), |config| config.global.log_config());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config)
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

fn dispatch_command(cli: &cli::Cli, config: hdn_make::error::Result<Config>) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => config.map(|config| run_options_command(&config)),
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Generate(args)) => {
            config.and_then(|config| run_generate_command(args, &config))
        }
        Some(Command::List(args)) => config.and_then(|config| run_list_command(args, &config)),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader
        .add_toml_file_optional(LOCAL_CONFIG_FILE)
        .with_env_prefix(ENV_PREFIX)
}

fn load_config(global: &GlobalOptions) -> hdn_make::error::Result<Config> {
    let mut loader = build_config_loader(global);
    for (key, value) in global.to_config_overrides()? {
        loader = loader.set(&key, value)?;
    }
    loader
        .build()
        .map_err(|e| anyhow::Error::from(e).context("failed to load configuration"))
}
