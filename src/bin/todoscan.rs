use anyhow::{Context, Result};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs;
use std::io::{self, Read};
use todoscan::cli::{self, CliOptions};
use todoscan::config::Settings;
use todoscan::model::TodoItem;
use todoscan::paths::AppPaths;

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_time_level(LevelFilter::Off)
        .build();
    // A logger may already be installed when embedded; that is not fatal.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn load_settings(opts: &CliOptions) -> Result<Settings> {
    match &opts.config {
        Some(path) => Settings::load(path),
        None => Settings::load_or_default(&AppPaths::get_config_file_path()?),
    }
}

fn read_document(path: &std::path::Path) -> Result<(String, String)> {
    if path.as_os_str() == "-" {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .context("Failed to read stdin")?;
        return Ok(("<stdin>".to_string(), contents));
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((path.to_string_lossy().to_string(), contents))
}

fn main() -> Result<()> {
    let opts = match cli::parse_args(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{}", e);
            cli::print_help("todoscan");
            std::process::exit(2);
        }
    };

    if opts.help || opts.files.is_empty() {
        cli::print_help("todoscan");
        return Ok(());
    }

    init_logging(opts.verbosity);

    let settings = load_settings(&opts)?;
    let parser = settings
        .build_parser()
        .context("Invalid settings")?;
    log::debug!(
        "Line tag '{}' ({}), global tag '{}' ({}), excluded folders {:?}",
        parser.date_parser().template(),
        parser.date_parser().date_format(),
        parser.global_date_parser().template(),
        parser.global_date_parser().date_format().pattern(),
        parser.excluded_folders()
    );

    let mut failed = 0;
    let mut todos: Vec<TodoItem> = Vec::new();
    for path in &opts.files {
        let (source, contents) = match read_document(path) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("{:#}", e);
                failed += 1;
                continue;
            }
        };
        todos.extend(parser.parse_tasks(&source, &contents));
    }

    if opts.open_only {
        todos.retain(|t| !t.is_done());
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&todos)?);
    } else {
        for todo in &todos {
            println!("{}", cli::format_todo_line(todo));
        }
    }

    // Partial output is still printed; the exit status reports the gap.
    if failed > 0 {
        eprintln!("{} of {} files could not be read", failed, opts.files.len());
        std::process::exit(1);
    }

    Ok(())
}
