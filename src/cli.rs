// File: ./src/cli.rs
//! Shared command-line interface logic: argument parsing, help and output lines.
use crate::model::TodoItem;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub json: bool,
    pub open_only: bool,
    pub verbosity: u8,
    pub help: bool,
    pub files: Vec<PathBuf>,
}

/// Parses arguments, excluding the binary name.
pub fn parse_args<I, S>(args: I) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut opts = CliOptions::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => opts.help = true,
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| format!("{} requires a path", arg))?;
                opts.config = Some(PathBuf::from(path));
            }
            "--json" => opts.json = true,
            "--open" => opts.open_only = true,
            "-v" => opts.verbosity = opts.verbosity.max(1),
            "-vv" => opts.verbosity = 2,
            "--" => {
                opts.files.extend(args.by_ref().map(PathBuf::from));
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(format!("Unknown option: {}", other));
            }
            other => opts.files.push(PathBuf::from(other)),
        }
    }

    Ok(opts)
}

/// `notes/a.md:2 [ ] Buy milk (2021-02-16)`
pub fn format_todo_line(todo: &TodoItem) -> String {
    let mut line = format!(
        "{}:{} [{}] {}",
        todo.source_path,
        todo.start_index,
        if todo.is_done() { 'x' } else { ' ' },
        todo.description
    );
    if let Some(date) = todo.action_date {
        line.push_str(&format!(" ({})", date.format("%Y-%m-%d")));
    }
    line
}

pub fn print_help(binary_name: &str) {
    println!(
        "Todoscan v{} - Collect checklist to-dos from plain text notes",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] <file>...", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <path>   Read settings from this TOML file.");
    println!("    --json                Print the to-dos as a JSON array.");
    println!("    --open                Only show to-dos that are not done.");
    println!("    -v, -vv               Log debug (-v) or trace (-vv) output to stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("RECOGNISED LINES:");
    println!("    - [ ] open to-do      * [ ] also open      - [] also open");
    println!("    - [x] done to-do");
    println!();
    println!("DATES (first match wins):");
    println!("    #2021-02-16           Date tag on the line itself (date_tag_format)");
    println!("    Daily Notes/<date>.md Note in the daily notes folder");
    println!("    #tbd-2021-07          Document wide tag (global_date_tag_format)");
    println!("    #someday              Someday/maybe: never dated");
    println!();
    println!("CONFIG KEYS:");
    println!("    date_format, date_tag_format, global_date_tag_format,");
    println!("    global_date_format, excluded_folders, daily_notes_folder,");
    println!("    daily_note_format");
}
