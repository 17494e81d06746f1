//! QDM Command-Line Interface
//!
//! Runs entanglement-metric sweeps of noisy layered circuits from an
//! experiment file.
//!
//! ```text
//! qdm init -o experiment.yaml
//! qdm sweep -c experiment.yaml --export report.json
//! qdm density -c experiment.yaml -q 3 -d 5 --show-matrix
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{density, gates, init, sweep, version, width};

/// QDM - entanglement metrics of noisy density matrices
#[derive(Parser)]
#[command(name = "qdm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep depth for every width of the experiment
    Sweep {
        /// Experiment file (YAML or JSON)
        #[arg(short, long)]
        config: String,

        /// Output file for the JSON report
        #[arg(short, long)]
        export: Option<String>,

        /// Write compact instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },

    /// Sweep depth at a single width
    Width {
        /// Experiment file (YAML or JSON)
        #[arg(short, long)]
        config: String,

        /// Number of qubits
        #[arg(short, long)]
        qubits: u32,
    },

    /// Compute one density matrix and its metrics
    Density {
        /// Experiment file (YAML or JSON)
        #[arg(short, long)]
        config: String,

        /// Number of qubits
        #[arg(short, long)]
        qubits: u32,

        /// Number of circuit layers
        #[arg(short, long)]
        depth: usize,

        /// Print the density matrix elements
        #[arg(long)]
        show_matrix: bool,
    },

    /// Show the basis gates of a circuit family
    Gates {
        /// Circuit family (ry_cx, rxyz_cz, u_cx, ibm_native, clifford)
        #[arg(long, default_value = "ry_cx")]
        choice: String,

        /// Simulation method (density_matrix, statevector)
        #[arg(short, long, default_value = "density_matrix")]
        method: String,
    },

    /// Write a template experiment file
    Init {
        /// Output file (.yaml, .yml or .json)
        #[arg(short, long, default_value = "experiment.yaml")]
        output: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Sweep {
            config,
            export,
            compact,
        } => sweep::execute(&config, export.as_deref(), compact),

        Commands::Width { config, qubits } => width::execute(&config, qubits),

        Commands::Density {
            config,
            qubits,
            depth,
            show_matrix,
        } => density::execute(&config, qubits, depth, show_matrix),

        Commands::Gates { choice, method } => gates::execute(&choice, &method),

        Commands::Init { output, force } => init::execute(&output, force),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
