// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use runtime::SessionMapHandle;
use std::env;
use std::path::PathBuf;
use sukima_app::{RouterCommand, RouterState};
use sukima_catalog::Catalog;
use sukima_tui::UiOptions;
use time::OffsetDateTime;
use time::macros::offset;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `sukima --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let catalog = load_catalog(&options, &config)?;
    if options.check_only {
        return Ok(());
    }

    let mut state = RouterState {
        date_window: config.date_window(),
        ..RouterState::default()
    };
    if let Some(screen) = config.start_screen() {
        state.dispatch(RouterCommand::SwitchTab(screen));
    }

    // Listing labels are fixed to JST.
    let today = OffsetDateTime::now_utc().to_offset(offset!(+9)).date();

    let ui_options = UiOptions {
        map_refresh_delay: config.map_refresh_delay(),
    };
    let mut map = SessionMapHandle::default();
    sukima_tui::run_app(&mut state, &catalog, &mut map, today, &ui_options)
}

fn load_catalog(options: &CliOptions, config: &Config) -> Result<Catalog> {
    if options.demo {
        return Catalog::demo();
    }

    match options.catalog_path.clone().or_else(|| config.catalog_path()) {
        Some(path) => Catalog::load(&path).with_context(|| {
            format!(
                "open catalog {} -- if this path is wrong, set [catalog].path or SUKIMA_CATALOG_PATH",
                path.display()
            )
        }),
        None => Catalog::demo(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    catalog_path: Option<PathBuf>,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        catalog_path: None,
        print_config_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--catalog" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--catalog requires a file path"))?;
                options.catalog_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("sukima");
    println!("  --config <path>          Use a specific config path");
    println!("  --catalog <path>         Load job listings from a catalog JSON file");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Launch with the embedded demo catalog");
    println!("  --check                  Validate config + catalog, then exit");
    println!("  --help                   Show this help");
}
