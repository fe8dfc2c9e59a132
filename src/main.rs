use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use npm_graph::export::{self, ExportData, ExportFormat};
use npm_graph::graph::BuildOptions;
use npm_graph::logging;
use npm_graph::project::Project;

#[derive(Parser)]
#[command(name = "npm-graph")]
#[command(version)]
#[command(about = "Build a weighted dependency graph from package.json and package-lock.json", long_about = None)]
struct Cli {
    /// Log debug output to stderr (NPM_GRAPH_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and write it out
    Graph {
        /// Project folder containing package.json and package-lock.json
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Output format: json, csv or markdown
        #[arg(short, long, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave devDependencies out of the graph
        #[arg(long)]
        no_dev: bool,
    },
    /// Print a short summary of the graph
    Stats {
        /// Project folder containing package.json and package-lock.json
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Leave devDependencies out of the graph
        #[arg(long)]
        no_dev: bool,
    },
    /// Show version information
    Version,
}

fn build_export(path: &Path, no_dev: bool) -> Result<ExportData> {
    let project = Project::load(path)?;
    let options = BuildOptions {
        include_dev_dependencies: !no_dev,
    };
    let graph = project.build_graph(options)?;

    Ok(ExportData::new(
        project.name().to_string(),
        project.version().to_string(),
        &graph,
    ))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Graph {
            path,
            format,
            output,
            no_dev,
        }) => {
            let data = build_export(&path, no_dev)?;

            match output {
                Some(file) => {
                    let handle = File::create(&file)
                        .with_context(|| format!("creating {}", file.display()))?;
                    let mut writer = BufWriter::new(handle);
                    export::export(format, &data, &mut writer)?;
                    writer.flush()?;
                    eprintln!(
                        "Wrote {} packages and {} links to {}",
                        data.node_count(),
                        data.link_count(),
                        file.display()
                    );
                }
                None => {
                    let stdout = io::stdout();
                    let mut writer = stdout.lock();
                    export::export(format, &data, &mut writer)?;
                }
            }
        }
        Some(Commands::Stats { path, no_dev }) => {
            let data = build_export(&path, no_dev)?;

            println!("{} {}", data.project_name, data.project_version);
            println!("  packages:     {}", data.node_count());
            println!("  links:        {}", data.link_count());
            println!("  direct:       {}", data.direct_count());
            println!("  deepest tier: {}", data.max_group());
            println!("  cycles:       {}", data.cycles.len());
        }
        Some(Commands::Version) => {
            println!("npm-graph v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("npm-graph - npm dependency graph builder");
            println!("Run 'npm-graph graph' to print the graph of the current project");
            println!("Run 'npm-graph --help' for more information");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
