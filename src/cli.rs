//! Command-line Definitions

use clap::{Parser, Subcommand};
use shelf_classify::Category;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "shelf", version, about = "Classify, deduplicate and shelve files by content")]
pub struct Cli {
    /// Storage root (overrides configuration)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ingest one or more files
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Store files under their content digest instead of their name
        #[arg(long)]
        hash_names: bool,
    },
    /// List stored files
    List {
        /// Only show this category
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,
    },
    /// Show counts and sizes per category
    Stats,
    /// Show the classification rules
    Categories,
}

fn parse_category(value: &str) -> Result<Category, String> {
    value.parse().map_err(|_| {
        let known: Vec<_> = Category::ALL.iter().map(Category::as_str).collect();
        format!("expected one of: {}", known.join(", "))
    })
}
