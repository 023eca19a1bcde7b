// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `vselect` lays out a JSON option list and prints the window for a scroll position.
//!
//! ```text
//! cat options.json | vselect --grouped --scroll 40 --viewport-height 10
//! vselect --options options.json --props props.json --output json
//! ```

use std::{io::{Read as _, Write as _, stdout},
          path::PathBuf};

use clap::{Parser, ValueEnum};
use crossterm::cursor::{MoveToNextLine, MoveToPreviousLine};
use miette::{IntoDiagnostic as _, WrapErr as _};
use select_virtualized::{OptionItem, RenderedFrame, SelectProps, SelectVirtualized,
                         Selection, TracingConfig, ViewportState, frame_lines,
                         paint_frame, parse_options_json, px, queue_commands_no_lock,
                         try_initialize_logging_global};
use tracing_core::LevelFilter;

/// In a terminal one layout unit is one line.
const TERMINAL_ROW_HEIGHT: u32 = 1;
const DEFAULT_VIEWPORT_HEIGHT: u32 = 10;
const DEFAULT_WIDTH: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Lines of text, no escape sequences.
    Plain,
    /// The rendered frame as JSON.
    Json,
    /// Paint the viewport in place with styles.
    Ansi,
}

#[derive(Debug, Parser)]
#[command(bin_name = "vselect")]
#[command(
    about = "Lay out a (possibly grouped) option list and print only the rows in view 📜",
    long_about = None
)]
#[command(version)]
#[command(next_line_help = true)]
struct CliArgs {
    /// JSON array of options: `[{ "value": "1", "label": "Apple", "group": "Fruit" }]`.
    /// Read from stdin when omitted.
    #[arg(value_name = "file", long, short = 'o')]
    options: Option<PathBuf>,

    /// JSON props. Flags below override fields from this file.
    #[arg(value_name = "file", long, short = 'p')]
    props: Option<PathBuf>,

    /// Insert a header row before the first option of every group.
    #[arg(long, short = 'g')]
    grouped: bool,

    #[arg(value_name = "units", long)]
    option_height: Option<u32>,

    #[arg(value_name = "units", long)]
    group_header_height: Option<u32>,

    #[arg(value_name = "rows", long)]
    overscan: Option<usize>,

    #[arg(value_name = "units", long, short = 's', default_value_t = 0)]
    scroll: u32,

    #[arg(value_name = "units", long, short = 'v', default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    viewport_height: u32,

    /// Key of the option to show as selected.
    #[arg(value_name = "key", long)]
    select: Option<String>,

    #[arg(value_name = "format", long, value_enum, default_value_t = OutputFormat::Plain)]
    output: OutputFormat,

    /// Write debug logs to this file.
    #[arg(value_name = "file", long)]
    log_file: Option<String>,

    /// Log at debug level instead of info.
    #[arg(long)]
    verbose: bool,
}

fn main() -> miette::Result<()> {
    let cli_args = CliArgs::parse();

    if let Some(log_file) = &cli_args.log_file {
        let level_filter = if cli_args.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        };
        try_initialize_logging_global(
            TracingConfig::new_file(Some(log_file.clone())).with_level_filter(level_filter),
        )?;
    }

    let options = read_options(cli_args.options.as_ref())?;
    let props = resolve_props(&cli_args)?;
    let viewport = ViewportState::new(px(cli_args.scroll), px(cli_args.viewport_height));

    tracing::info!(
        message = "📜 vselect",
        option_count = options.len(),
        props = ?props,
        viewport = ?viewport,
    );

    let maybe_selected = cli_args.select.as_deref().and_then(|key| {
        options
            .iter()
            .find(|it| it.value.as_deref() == Some(key))
            .cloned()
            .map(Selection::Single)
    });

    let mut select = SelectVirtualized::builder(options)
        .props(props)
        .viewport(viewport)
        .build()?;
    select.set_value(maybe_selected);
    let frame = select.render();

    print_frame(&frame, cli_args.output)
}

fn read_options(maybe_path: Option<&PathBuf>) -> miette::Result<Vec<OptionItem>> {
    let json = match maybe_path {
        Some(path) => std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Can't read options from {}", path.display()))?,
        None => {
            let mut acc = String::new();
            std::io::stdin()
                .read_to_string(&mut acc)
                .into_diagnostic()
                .wrap_err("Can't read options from stdin")?;
            acc
        }
    };
    parse_options_json(&json)
}

/// Without a props file the heights default to one terminal line.
fn resolve_props(cli_args: &CliArgs) -> miette::Result<SelectProps> {
    let mut props = match &cli_args.props {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("Can't read props from {}", path.display()))?;
            SelectProps::from_json(&json)?
        }
        None => SelectProps {
            option_height: px(TERMINAL_ROW_HEIGHT),
            ..Default::default()
        },
    };

    if cli_args.grouped {
        props.grouped = true;
    }
    if let Some(height) = cli_args.option_height {
        props.option_height = px(height);
    }
    if let Some(height) = cli_args.group_header_height {
        props.group_header_height = Some(px(height));
    }
    if let Some(overscan) = cli_args.overscan {
        props.overscan = overscan;
    }

    Ok(props)
}

fn print_frame(frame: &RenderedFrame, output: OutputFormat) -> miette::Result<()> {
    let width = crossterm::terminal::size().map_or(DEFAULT_WIDTH, |(col_count, _)| col_count);

    match output {
        OutputFormat::Plain => {
            for line in frame_lines(frame, width) {
                println!("{}", line.text);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(frame).into_diagnostic()?;
            println!("{json}");
        }
        OutputFormat::Ansi => {
            let line_count = frame.viewport.viewport_height.as_u16();
            if line_count == 0 {
                return Ok(());
            }

            // Make room first, the painter draws in place and moves the cursor back up.
            for _ in 0..line_count {
                println!();
            }
            let mut stdout = stdout().lock();
            queue_commands_no_lock!(&mut stdout, MoveToPreviousLine(line_count));
            paint_frame(&mut stdout, frame, width)?;

            // Leave the cursor below the painted rows.
            queue_commands_no_lock!(&mut stdout, MoveToNextLine(line_count));
            stdout.flush().into_diagnostic()?;
        }
    }

    Ok(())
}
