use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use jsreshape::config::{self, Config};
use jsreshape::{engine, MatchResult};
use similar::{ChangeTag, TextDiff};
use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "jsreshape")]
#[command(about = "Structural search and rewrite for JavaScript", long_about = None)]
#[command(version)]
struct Cli {
    /// Log what the engine does to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reprint sources with the configured style
    Format {
        /// Files or directories (searched for *.js); stdin when empty
        files: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Apply rewrite rules
    Rewrite {
        files: Vec<PathBuf>,

        /// Rule text `pattern -> template`, may be repeated; defaults to the
        /// rules of the config file
        #[arg(short, long = "rule")]
        rules: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Find code matching a pattern
    Search {
        files: Vec<PathBuf>,

        /// Pattern text, wildcards as in rules
        #[arg(short, long)]
        pattern: String,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report syntax and early errors
    Validate {
        files: Vec<PathBuf>,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the syntax tree as JSON
    Ast { files: Vec<PathBuf> },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Config file (defaults to the nearest .jsreshape.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replace files in place
    #[arg(short, long)]
    write: bool,

    /// Show unified diff of changes instead of the output
    #[arg(short, long)]
    diff: bool,
}

/// One source text and where it came from.
struct Input {
    path: Option<PathBuf>,
    text: String,
}

impl Input {
    fn label(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "<stdin>".to_string(),
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Format { files, output } => cmd_format(&files, &output),
        Commands::Rewrite {
            files,
            rules,
            output,
        } => cmd_rewrite(&files, rules, &output),
        Commands::Search {
            files,
            pattern,
            json,
        } => cmd_search(&files, &pattern, json),
        Commands::Validate { files, json } => cmd_validate(&files, json),
        Commands::Ast { files } => cmd_ast(&files),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "jsreshape=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Helper: Read every input. Directories are walked for `*.js` files in
/// sorted order; no paths at all means stdin.
fn read_inputs(files: &[PathBuf]) -> Result<Vec<Input>> {
    if files.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(vec![Input { path: None, text }]);
    }

    let mut paths = Vec::new();
    for file in files {
        if file.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(file) {
                let entry = entry?;
                if entry.file_type().is_file()
                    && entry.path().extension().and_then(|s| s.to_str()) == Some("js")
                {
                    found.push(entry.path().to_path_buf());
                }
            }
            found.sort();
            paths.extend(found);
        } else {
            paths.push(file.clone());
        }
    }

    paths
        .into_iter()
        .map(|path| {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(Input {
                path: Some(path),
                text,
            })
        })
        .collect()
}

/// Resolve configuration: explicit path first, then discovery from the
/// current directory, then defaults.
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Ok(config::load_from_path(path)?);
    }
    let cwd = env::current_dir().context("Failed to get current directory")?;
    match config::discover(&cwd) {
        Some(path) => Ok(config::load_from_path(&path)?),
        None => Ok(Config::default()),
    }
}

fn cmd_format(files: &[PathBuf], output: &OutputArgs) -> Result<ExitCode> {
    let config = load_config(output.config.as_deref())?;
    check_output_flags(files, output)?;

    for input in read_inputs(files)? {
        let formatted = engine::format(&input.text, &config.format)
            .with_context(|| format!("Failed to format {}", input.label()))?;
        emit(&input, &with_newline(formatted), output)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_rewrite(files: &[PathBuf], rules: Vec<String>, output: &OutputArgs) -> Result<ExitCode> {
    check_output_flags(files, output)?;
    let rules = if rules.is_empty() {
        load_config(output.config.as_deref())?.rules
    } else {
        rules
    };
    if rules.is_empty() {
        anyhow::bail!("No rules given: pass --rule or list rules in a config file");
    }

    for input in read_inputs(files)? {
        let rewritten = engine::rewrite_all(&input.text, &rules)
            .with_context(|| format!("Failed to rewrite {}", input.label()))?;
        // Untouched inputs come back verbatim and must stay that way.
        let rewritten = if rewritten == input.text {
            rewritten
        } else {
            with_newline(rewritten)
        };
        emit(&input, &rewritten, output)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_search(files: &[PathBuf], pattern: &str, json: bool) -> Result<ExitCode> {
    let mut report = Vec::new();
    let mut total = 0;

    for input in read_inputs(files)? {
        let matches = engine::search(&input.text, pattern)
            .with_context(|| format!("Failed to search {}", input.label()))?;
        total += matches.len();
        if json {
            report.push(serde_json::json!({
                "file": input.label(),
                "matches": matches,
            }));
        } else {
            for m in &matches {
                print_match(&input, m);
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if total == 0 {
        eprintln!("{}", "No matches".yellow());
    }
    Ok(if total == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_match(input: &Input, m: &MatchResult) {
    let (line, column) = line_column(&input.text, m.range.start);
    let snippet = input.text.get(m.range.clone()).unwrap_or_default();
    let first_line = snippet.lines().next().unwrap_or_default();
    println!(
        "{}:{}:{}: {}",
        input.label().bold(),
        line,
        column,
        first_line
    );
    for (name, binding) in m.bindings.iter() {
        println!("  {} = {}", name.cyan(), binding.source());
    }
}

fn cmd_validate(files: &[PathBuf], json: bool) -> Result<ExitCode> {
    let mut report = Vec::new();
    let mut total = 0;

    for input in read_inputs(files)? {
        let diagnostics = engine::validate(&input.text)
            .with_context(|| format!("Failed to validate {}", input.label()))?;
        total += diagnostics.len();
        if json {
            report.push(serde_json::json!({
                "file": input.label(),
                "diagnostics": diagnostics,
            }));
            continue;
        }
        for diagnostic in &diagnostics {
            println!(
                "{}:{}:{}: {}",
                input.label(),
                diagnostic.line_number,
                diagnostic.column,
                diagnostic.description.red()
            );
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(if total == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_ast(files: &[PathBuf]) -> Result<ExitCode> {
    for input in read_inputs(files)? {
        let tree = engine::parse(&input.text)
            .with_context(|| format!("Failed to parse {}", input.label()))?;
        println!("{}", serde_json::to_string_pretty(&*tree)?);
    }
    Ok(ExitCode::SUCCESS)
}

fn check_output_flags(files: &[PathBuf], output: &OutputArgs) -> Result<()> {
    if output.write && files.is_empty() {
        anyhow::bail!("--write needs file arguments");
    }
    if output.write && output.diff {
        anyhow::bail!("--write and --diff cannot be combined");
    }
    Ok(())
}

/// Helper: Print, diff, or write back the new text of one input.
fn emit(input: &Input, updated: &str, output: &OutputArgs) -> Result<()> {
    if output.diff {
        if updated != input.text {
            display_diff(&input.label(), &input.text, updated);
        }
        return Ok(());
    }
    match (&input.path, output.write) {
        (Some(path), true) => {
            if updated != input.text {
                atomic_write(path, updated.as_bytes())
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("{} {}", "✓".green(), path.display());
            }
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(updated.as_bytes())?;
        }
    }
    Ok(())
}

/// Helper: Show unified diff between original and modified content
fn display_diff(label: &str, original: &str, modified: &str) {
    println!("{}", format!("--- {} (original)", label).dimmed());
    println!("{}", format!("+++ {} (rewritten)", label).dimmed());

    let diff = TextDiff::from_lines(original, modified);
    for change in diff.iter_all_changes() {
        let line = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", line);
        if change.missing_newline() {
            println!();
        }
    }
}

/// Tempfile in the same directory, fsync, then rename over the target.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn with_newline(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// 1-based line and column of a byte offset.
fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = text.get(..offset).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}
