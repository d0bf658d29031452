//! reindent - Indentation repair for code embedded in quiz question text

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context;
use glob::Pattern;
use log::{debug, info, warn};
use rayon::prelude::*;
use reindent::process::{detect_file, format_file, review_file, FormatOutcome};
use reindent::{parse_args, CliArgs, Config, Result};
use walkdir::WalkDir;

/// Default maximum input size in bytes (100 MB)
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    let args = parse_args();
    init_logging(&args);

    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // No inputs on a terminal: nothing to read, print usage
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    if use_stdin {
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // An explicit config applies to every file; otherwise discover per file
    let use_per_file_config = args.config.is_none();
    let base_config = if use_per_file_config {
        None
    } else {
        Some(build_config(&args, None)?)
    };

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                warn!("failed to configure thread pool: {e}");
            }
        }
    }

    // Extensions for directory walks come from the explicit config or the
    // working directory's config, plus any given on the command line
    let walk_config = match &base_config {
        Some(config) => config.clone(),
        None => build_config(&args, None)?,
    };
    let files = collect_files(&args, &walk_config.extensions);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No input files found.");
        }
        return Ok(());
    }

    let use_sequential = args.stdout || args.detect || args.jobs == Some(1);
    if use_sequential {
        process_files_sequential(&files, base_config.as_ref(), &args);
    } else {
        process_files_parallel(&files, base_config.as_ref(), &args);
    }

    Ok(())
}

/// Set up `env_logger`; `RUST_LOG` wins over the CLI flags
fn init_logging(args: &CliArgs) {
    let default_filter = if args.silent {
        "off"
    } else if args.debug {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        debug!("Using explicit config file: {}", config_path.display());
        Config::from_toml_file(config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        let discovered = Config::discover_config_files(&start);
        if discovered.is_empty() {
            debug!("No config files discovered for: {}", start.display());
        } else {
            for f in &discovered {
                debug!("Discovered config file: {}", f.display());
            }
        }
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    if let Some(indent) = args.indent {
        config.indent_width = indent;
    }
    if !args.markers.is_empty() {
        config.answer_markers.clone_from(&args.markers);
    }
    if args.only_detected {
        config.only_detected = true;
    }
    config.extensions.extend(args.extensions.iter().cloned());

    debug!("Configuration: {config:?}");

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs, extensions: &[String]) -> Vec<PathBuf> {
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("ignoring invalid exclude pattern {p:?}: {e}");
                None
            }
        })
        .collect();

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            // Explicit files are taken regardless of extension
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && has_extension(path, extensions, args.json)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else if let Ok(entries) = std::fs::read_dir(input) {
                for entry in entries.filter_map(std::result::Result::ok) {
                    let path = entry.path();
                    if path.is_file()
                        && has_extension(path.as_path(), extensions, args.json)
                        && !is_excluded(&path, &exclude_patterns)
                    {
                        files.push(path);
                    }
                }
            }
        } else {
            warn!("{} does not exist", input.display());
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        if pattern.matches(&path_str) {
            return true;
        }

        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Directory patterns match any component
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Check a file's extension against the configured list (with or without
/// leading dot). JSON review mode only picks up `.json` files.
fn has_extension(path: &Path, extensions: &[String], json: bool) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            if json {
                return ext.eq_ignore_ascii_case("json");
            }
            extensions
                .iter()
                .any(|wanted| ext == wanted.strip_prefix('.').unwrap_or(wanted))
        })
}

/// Resolve the config for one file
fn config_for(path: &Path, base_config: Option<&Config>, args: &CliArgs) -> Result<Config> {
    match base_config {
        Some(config) => Ok(config.clone()),
        None => build_config(args, Some(path)),
    }
}

/// Process files sequentially (stdout, detection reports, or --jobs 1)
fn process_files_sequential(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) {
    for path in files {
        let file_result = config_for(path, base_config, args)
            .and_then(|config| process_single_file(path, &config, args));

        if let Err(e) = file_result {
            eprintln!("Error processing {}: {e:#}", path.display());
        }
    }
}

/// Process files in parallel using Rayon
fn process_files_parallel(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) {
    let changed_count = AtomicUsize::new(0);
    let unchanged_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        let file_result = config_for(path, base_config, args)
            .and_then(|config| process_single_file(path, &config, args));

        match file_result {
            Ok(Some(FormatOutcome::Changed)) => {
                changed_count.fetch_add(1, Ordering::Relaxed);
            }
            Ok(_) => {
                unchanged_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error processing {}: {e:#}", path.display());
            }
        }
    });

    let changed = changed_count.load(Ordering::Relaxed);
    let unchanged = unchanged_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Reindented {changed} files, {unchanged} left unchanged.");
        } else {
            eprintln!("Reindented {changed} files, {unchanged} left unchanged, {errors} errors.");
        }
    }
}

/// Read a file into memory, refusing anything over the size limit
fn read_limited(path: &Path, args: &CliArgs) -> Result<Option<Vec<u8>>> {
    let file_size = std::fs::metadata(path)?.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                file_size / (1024 * 1024),
                DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
            );
        }
        return Ok(None);
    }

    let mut contents = Vec::new();
    File::open(path)?.read_to_end(&mut contents)?;
    Ok(Some(contents))
}

/// Process a single file
///
/// Returns the formatting outcome, or `None` for detection reports, which
/// write nothing back.
fn process_single_file(
    path: &Path,
    config: &Config,
    args: &CliArgs,
) -> Result<Option<FormatOutcome>> {
    let Some(contents) = read_limited(path, args)? else {
        return Ok(Some(FormatOutcome::Skipped));
    };
    let name = path.to_string_lossy();
    let reader = BufReader::new(Cursor::new(&contents));

    if args.detect {
        let report = detect_file(reader, &name)?;
        println!("{}: {}", path.display(), report.summary());
        return Ok(None);
    }

    let mut output = Vec::new();
    let outcome = if args.json {
        review_file(reader, &mut output, config, &name)?
    } else {
        format_file(reader, &mut output, config, &name)?
    };

    if args.stdout {
        io::stdout().write_all(&output)?;
    } else if output != contents {
        info!("Reindented {}", path.display());
        std::fs::write(path, &output)?;
    } else {
        debug!("{} already clean", path.display());
    }

    Ok(Some(outcome))
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs) -> Result<()> {
    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    let stdin_size = u64::try_from(stdin_contents.len()).unwrap_or(u64::MAX);
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    let reader = BufReader::new(Cursor::new(&stdin_contents));

    if args.detect {
        let report = detect_file(reader, "stdin")?;
        println!("stdin: {}", report.summary());
        return Ok(());
    }

    let mut output = Vec::new();
    let outcome = if args.json {
        review_file(reader, &mut output, config, "stdin")?
    } else {
        format_file(reader, &mut output, config, "stdin")?
    };
    debug!("stdin: {outcome:?}");

    io::stdout().write_all(&output)?;
    Ok(())
}

fn print_usage() {
    println!(
        "reindent v{} - indentation repair for code in quiz questions",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage:");
    println!("  reindent [OPTIONS] <FILE>...");
    println!("  reindent [OPTIONS] -r <DIRECTORY>");
    println!("  reindent [OPTIONS] -              # Read from stdin");
    println!("  cat question.txt | reindent       # Pipe input");
    println!();
    println!("Examples:");
    println!("  reindent q1.txt                   # Repair a file in-place");
    println!("  reindent --stdout q1.txt          # Print the repaired text");
    println!("  reindent --detect bank/*.txt      # Report which files look like code");
    println!("  reindent --json -s import.json    # Review a quiz-item batch");
    println!("  reindent -r -x quiz bank/         # Repair a directory tree");
    println!();
    println!("Run `reindent --help` for all options.");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for reindent.toml in parent directories");
    println!("  starting from the file being formatted up to the root directory.");
    println!("  Also checks reindent.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
}
