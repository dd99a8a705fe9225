mod cli;

use crate::cli::{Cli, Command};
use clap::Parser;
use shelf_classify::Category;
use shelf_config::Config;
use shelf_library::{Library, Naming, Upload};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("shelf={level},shelf_library={level},shelf_catalog={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            tracing::debug!("{err:?}");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        },
    };
    if let Some(root) = cli.root {
        config.root = root;
    }

    match cli.command {
        Command::Categories => {
            categories();
            ExitCode::SUCCESS
        },
        command => run(command, config),
    }
}

fn run(command: Command, config: Config) -> ExitCode {
    let mut library = match Library::open(&config.root) {
        Ok(library) => library,
        Err(err) => {
            tracing::debug!("{err:?}");
            eprintln!("error: cannot open {}: {err}", config.root.display());
            return ExitCode::FAILURE;
        },
    };
    match command {
        Command::Upload { files, hash_names } => {
            let naming = Naming::from_preserve_name(!(hash_names || config.hash_names));
            upload(&mut library, files, naming)
        },
        Command::List { category } => {
            list(&library, category);
            ExitCode::SUCCESS
        },
        Command::Stats => {
            stats(&library);
            ExitCode::SUCCESS
        },
        Command::Categories => {
            categories();
            ExitCode::SUCCESS
        },
    }
}

fn upload(library: &mut Library, files: Vec<PathBuf>, naming: Naming) -> ExitCode {
    let mut failed = 0usize;
    for file in &files {
        match library.upload(file, naming) {
            Ok(Upload::Success(record)) => {
                println!("stored\t{}\t{}\t{}", record.category, record.size, record.path.display());
            },
            Ok(Upload::Duplicate(record)) => {
                println!("duplicate\t{}\t{}\t{}", record.category, record.size, record.path.display());
            },
            Err(err) => {
                failed += 1;
                tracing::debug!("{err:?}");
                eprintln!("error: {}: {err}", file.display());
            },
        }
    }
    if failed > 0 {
        eprintln!("{failed} of {} uploads failed", files.len());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn list(library: &Library, category: Option<Category>) {
    for record in library.list(category) {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            record.hash,
            record.category,
            record.size,
            record.path.display(),
            record.original_name
        );
    }
}

fn stats(library: &Library) {
    let stats = library.statistics();
    println!("total\t{}\t{}", stats.total_count, stats.total_bytes());
    for (category, entry) in &stats.per_category {
        println!("{category}\t{}\t{}", entry.count, entry.total_bytes);
    }
}

fn categories() {
    for (category, rules) in Library::categories() {
        if rules.is_empty() {
            println!("{category}\t(fallback)");
            continue;
        }
        println!("{category}\t{}\t{}", rules.extensions.join(" "), rules.content_types.join(" "));
    }
}
