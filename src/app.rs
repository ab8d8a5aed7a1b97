// Declare modules
pub mod cli;
pub mod config;
pub mod includes;
pub mod models;
pub mod recipe;
pub mod scanner;
pub mod writer;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use self::cli::Cli;
use self::config::{resolve_answers, ConfigSource, Configurator, LinePrompt, Prompt, TerminalPrompt};
use self::includes::{missing_headers, scan_includes};
use self::models::{Defaults, FileSet, ProjectConfig};
use self::scanner::Scanner;
use self::writer::write_recipe;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let cli = Cli::parse();

    if cli.print {
        eprintln!("Welcome to the Makefile generator!");
    } else {
        println!("Welcome to the Makefile generator!");
    }

    // 2. Identify Project Root
    let root = fs::canonicalize(&cli.root)
        .with_context(|| format!("Failed to resolve project directory {:?}", cli.root))?;
    let dir_name = root.file_name().and_then(|n| n.to_str());

    // 3. Resolve Configuration (CLI > preset > prompt)
    let answers = resolve_answers(&cli, dir_name)?;
    let mut prompt: Box<dyn Prompt> = if io::stdin().is_terminal() {
        Box::new(TerminalPrompt)
    } else {
        Box::new(LinePrompt::new(io::stdin().lock(), io::stderr()))
    };
    let config = Configurator::new(Defaults::default(), answers, prompt.as_mut())
        .track_dependencies(!cli.no_deps)
        .project_config()?;
    log::debug!("Project configuration: {:?}", config);

    // 4. Scan Directory
    let sources = discover(&cli, &root, &config, ".c")?;
    let headers = discover(&cli, &root, &config, ".h")?;

    log::info!("{} source(s), {} header(s)", sources.len(), headers.len());
    if sources.is_empty() {
        log::warn!("⚠️ No .c files found under {}", root.display());
    }
    for (source, header) in missing_headers(&scan_includes(&root, &sources)?, &headers) {
        log::warn!("{} includes \"{}\", which was not found in the project", source, header);
    }

    // 5. Render
    log::debug!("Rendering fragments {:?}", recipe::fragment_names(&config));
    let text = recipe::render(&config, &sources);

    // 6. Write
    if cli.print {
        print!("{}", text);
    } else {
        write_recipe(&root.join(&cli.output), &text)?;
        println!("Makefile generated successfully!");
    }

    Ok(())
}

fn discover(cli: &Cli, root: &Path, config: &ProjectConfig, extension: &str) -> Result<FileSet> {
    Scanner::new(root, &[extension])
        .prune(config.library_dirs())
        .exclude(&cli.exclude)?
        .git_ignore(cli.gitignore)
        .scan()
}
