//! idlprune CLI - Command line interface for the IDL pruner

mod logging;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use idlprune_ast::{FileId, IdlGraph};
use idlprune_core::{crop, PruneError, Pruner};
use idlprune_store::{
    FixedIdentity, GitRemoteIdentity, RepositoryIdentity, ReservationStore, YamlFileStore,
    DEFAULT_CONFIG_FILE,
};

use logging::{init_logging, LogLevel};

#[derive(Parser)]
#[command(name = "idlprune")]
#[command(about = "Remove unused declarations from Thrift IDL files", long_about = None)]
struct Cli {
    /// Log verbosity; RUST_LOG overrides it
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prune a single merged document, keeping only what the reservations need
    Crop {
        /// JSON-serialized file graph
        graph: PathBuf,
        /// Comma-separated names to keep
        #[arg(short, long, value_delimiter = ',')]
        reserve: Vec<String>,
        /// Document to crop (defaults to the first one in the graph)
        #[arg(long)]
        file: Option<String>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Prune a whole include graph, recording reservations in the store
    Prune {
        /// JSON-serialized file graph
        graph: PathBuf,
        /// Comma-separated names to keep in the root document
        #[arg(short, long, value_delimiter = ',')]
        reserve: Vec<String>,
        /// Root document (defaults to the first one in the graph)
        #[arg(long)]
        root: Option<String>,
        /// Sticky reservation store
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Use this repository identity instead of asking git
        #[arg(long)]
        repo: Option<String>,
        /// Git remote whose URL identifies a repository
        #[arg(long, default_value = "origin")]
        remote: String,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// List the reservations recorded in the store
    Reservations {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Commands::Crop {
            graph,
            reserve,
            file,
            output,
            pretty,
        } => cmd_crop(&graph, &reserve, file.as_deref(), output, pretty),
        Commands::Prune {
            graph,
            reserve,
            root,
            config,
            repo,
            remote,
            output,
            pretty,
        } => cmd_prune(
            &graph,
            &reserve,
            root.as_deref(),
            &config,
            repo,
            remote,
            output,
            pretty,
        ),
        Commands::Reservations { config } => cmd_reservations(&config),
    }
}

fn cmd_crop(
    input: &Path,
    reserve: &[String],
    file: Option<&str>,
    output: Option<PathBuf>,
    pretty: bool,
) {
    let mut graph = read_graph(input);
    let id = select_file(&graph, file).unwrap_or_else(|msg| exit_with(&msg));
    let reserved = split_reservations(reserve);

    let Some(document) = graph.get_mut(id) else {
        exit_with(&format!("file #{} is not in the graph", id.0));
    };
    let report = match crop(document, &reserved) {
        Ok(r) => r,
        Err(e) => report_prune_error(&e),
    };

    eprintln!(
        "Cropped {}: {} names kept; removed {}",
        document.path,
        report.reserved.len(),
        report.removed
    );
    write_graph(&graph, output, pretty);
}

#[allow(clippy::too_many_arguments)]
fn cmd_prune(
    input: &Path,
    reserve: &[String],
    root: Option<&str>,
    config: &Path,
    repo: Option<String>,
    remote: String,
    output: Option<PathBuf>,
    pretty: bool,
) {
    let mut graph = read_graph(input);
    let root = select_file(&graph, root).unwrap_or_else(|msg| exit_with(&msg));
    let reserved = split_reservations(reserve);

    let identity: Box<dyn RepositoryIdentity> = match repo {
        Some(id) => Box::new(FixedIdentity::new(id)),
        None => Box::new(GitRemoteIdentity::new(remote)),
    };
    let mut store = YamlFileStore::new(config);

    let report = {
        let mut pruner = Pruner::new(&mut store, identity.as_ref());
        match pruner.run(&mut graph, root, &reserved) {
            Ok(r) => r,
            Err(e) => report_prune_error(&e),
        }
    };

    for file in &report.files {
        eprintln!(
            "{}: {} names kept; removed {}",
            file.path,
            file.reserved.len(),
            file.removed
        );
    }
    for dropped in &report.dropped_includes {
        eprintln!("{}: dropped include of {}", dropped.owner, dropped.include);
    }
    eprintln!(
        "Pruned {} files ({} declarations removed, {} store entries updated)",
        report.files.len(),
        report.total_removed(),
        report.store_updates
    );

    write_graph(&graph, output, pretty);
}

fn cmd_reservations(config: &Path) {
    let store = YamlFileStore::new(config);
    let sticky = match store.load() {
        Ok(c) => c,
        Err(e) => exit_with(&format!("error: {}", e)),
    };

    if sticky.is_empty() {
        println!("No reservations recorded in {}", config.display());
        return;
    }

    for repository in sticky.repositories() {
        println!("{}", repository);
        for (file, names) in sticky.files(repository) {
            println!("  {}: {}", file, names.join(", "));
        }
    }
}

/// Split-and-trim already happened in clap; drop the empty items `A,,B` leaves
fn split_reservations(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn select_file(graph: &IdlGraph, path: Option<&str>) -> Result<FileId, String> {
    match path {
        Some(path) => graph
            .id_of(path)
            .ok_or_else(|| format!("{} is not in the graph", path)),
        None if graph.is_empty() => Err("the graph has no files".to_string()),
        None => Ok(FileId(0)),
    }
}

fn read_graph(path: &Path) -> IdlGraph {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => exit_with(&format!("Error reading {}: {}", path.display(), e)),
    };

    match serde_json::from_str(&source) {
        Ok(graph) => graph,
        Err(e) => exit_with(&format!("Error parsing {}: {}", path.display(), e)),
    }
}

fn write_graph(graph: &IdlGraph, output: Option<PathBuf>, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(graph)
    } else {
        serde_json::to_string(graph)
    };
    let json = match json {
        Ok(j) => j,
        Err(e) => exit_with(&format!("Error serializing graph: {}", e)),
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, json) {
                exit_with(&format!("Error writing {}: {}", path.display(), e));
            }
        }
        None => println!("{}", json),
    }
}

fn report_prune_error(error: &PruneError) -> ! {
    eprintln!("error[{}]: {}", error.code(), error);
    std::process::exit(1);
}

fn exit_with(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
