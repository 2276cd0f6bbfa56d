//! Voltflow - Wiring Diagram Voltage-Flow Simulator
//!
//! Loads a diagram, applies toggles, and reports energization, circuit
//! paths or a fault explanation.
//!
//! # Usage
//!
//! ```bash
//! voltflow simulate conveyor.vf --toggle=-B1
//! voltflow explain conveyor.vf -- -K1
//! voltflow validate conveyor.json
//! ```
//!
//! Designations often start with `-`; pass them as `--toggle=-B1` or after
//! `--`.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use voltflow_core::{
    circuit::validate_diagram, dsl, error::Result, CircuitPath, Diagram, EnergizationMap, Simulator,
    SimulatorConfig, VoltflowError,
};

/// Voltage-flow simulator for industrial wiring diagrams
#[derive(Parser, Debug)]
#[command(name = "voltflow", author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Extra control voltage class (repeatable)
    #[arg(long = "control-class", value_name = "CLASS", global = true)]
    control_classes: Vec<String>,

    /// Extra power voltage class (repeatable)
    #[arg(long = "power-class", value_name = "CLASS", global = true)]
    power_classes: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct DiagramInput {
    /// Diagram file (.json for the interchange form, anything else is DSL)
    #[arg(value_name = "DIAGRAM")]
    diagram: PathBuf,

    /// Toggle a component before reporting (repeatable, applied in order)
    #[arg(long = "toggle", value_name = "DESIGNATION", allow_hyphen_values = true)]
    toggles: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List energized components
    Simulate {
        #[command(flatten)]
        input: DiagramInput,
        /// Only list components driven by this voltage class
        #[arg(long)]
        class: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Trace the supply path of a component, and the contact circuit of a contactor or relay
    Trace {
        #[command(flatten)]
        input: DiagramInput,
        /// Component designation, e.g. -K1
        #[arg(allow_hyphen_values = true)]
        designation: String,
    },
    /// Explain why a component is or is not energized
    Explain {
        #[command(flatten)]
        input: DiagramInput,
        /// Component designation, e.g. -K1
        #[arg(allow_hyphen_values = true)]
        designation: String,
    },
    /// Report non-fatal problems in a diagram
    Validate {
        /// Diagram file
        #[arg(value_name = "DIAGRAM")]
        diagram: PathBuf,
    },
}

#[derive(Serialize)]
struct EnergizedEntry<'a> {
    id: &'a str,
    designation: &'a str,
    #[serde(rename = "type")]
    kind: String,
    voltage_type: Option<&'a str>,
    voltage_level: f64,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Simulate { input, class, json } => {
            let (sim, map) = prepare(cli, input)?;
            cmd_simulate(&sim, &map, class.as_deref(), *json)
        }
        Commands::Trace { input, designation } => {
            let (sim, map) = prepare(cli, input)?;
            cmd_trace(&sim, &map, designation);
            Ok(())
        }
        Commands::Explain { input, designation } => {
            let (sim, map) = prepare(cli, input)?;
            println!("{}", sim.explain_state(designation, &map));
            Ok(())
        }
        Commands::Validate { diagram } => {
            let sim = load(cli, diagram)?;
            cmd_validate(&sim);
            Ok(())
        }
    }
}

/// Load the diagram and build a simulator with the effective voltage classes.
fn load(cli: &Cli, path: &Path) -> Result<Simulator> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let (diagram, mut config) = if is_json {
        let text = std::fs::read_to_string(path).map_err(|e| VoltflowError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        (Diagram::from_json(&text)?, SimulatorConfig::new())
    } else {
        let ast = dsl::parse_file(path)?;
        (Diagram::from_ast(&ast)?, SimulatorConfig::new().with_directives(&ast))
    };

    for class in &cli.control_classes {
        config = config.add_control_class(class);
    }
    for class in &cli.power_classes {
        config = config.add_power_class(class);
    }

    debug!(
        path = %path.display(),
        components = diagram.len(),
        wires = diagram.wires().len(),
        "diagram loaded"
    );
    Simulator::with_config(diagram, config)
}

/// Load, simulate, then apply the requested toggles in order.
fn prepare(cli: &Cli, input: &DiagramInput) -> Result<(Simulator, EnergizationMap)> {
    let mut sim = load(cli, &input.diagram)?;
    let mut map = sim.simulate_step();
    for designation in &input.toggles {
        if sim.diagram().find(designation).is_none() {
            warn!(designation = %designation, "toggle target not found");
        }
        map = sim.toggle_component(designation, map);
    }
    Ok((sim, map))
}

fn cmd_simulate(
    sim: &Simulator,
    map: &EnergizationMap,
    class: Option<&str>,
    json: bool,
) -> Result<()> {
    let energized = sim.get_energized_components(map, class);

    if json {
        let entries: Vec<EnergizedEntry> = energized
            .iter()
            .map(|c| {
                let node = map.get(&c.id);
                EnergizedEntry {
                    id: c.id.as_str(),
                    designation: &c.designation,
                    kind: c.kind.to_string(),
                    voltage_type: node
                        .and_then(|n| n.voltage_type.as_ref())
                        .map(|v| v.as_str()),
                    voltage_level: node.map_or(0.0, |n| n.voltage_level),
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if energized.is_empty() {
        println!("No energized components");
        return Ok(());
    }

    println!("{:<12} {:<10} {:<20} CLASS", "DESIGNATION", "ID", "TYPE");
    for component in &energized {
        let class = map
            .get(&component.id)
            .and_then(|n| n.voltage_type.as_ref())
            .map_or("-", |v| v.as_str());
        println!(
            "{:<12} {:<10} {:<20} {}",
            component.designation,
            component.id,
            component.kind.to_string(),
            class
        );
    }
    println!("{} of {} components energized", energized.len(), sim.diagram().len());
    Ok(())
}

fn cmd_trace(sim: &Simulator, map: &EnergizationMap, designation: &str) {
    let tracer = sim.tracer(map);
    let bridging = sim.diagram().find(designation).is_some_and(|c| c.kind.is_bridging());

    let label = if bridging { "Coil circuit" } else { "Control supply" };
    print_path(label, &tracer.trace_coil_circuit(designation));

    if bridging {
        let (supply, load) = tracer.trace_contact_circuit(designation);
        print_path("Contact supply", &supply);
        print_path("Contact load", &load);
    }
}

fn print_path(label: &str, path: &CircuitPath) {
    if path.is_sentinel() {
        println!("{}: {}", label, path.source);
    } else {
        println!("{}: {} [{}] {}", label, path.render(), path.voltage_type, path.status());
    }
}

fn cmd_validate(sim: &Simulator) {
    let warnings = validate_diagram(sim.diagram(), &sim.config().domains);
    if warnings.is_empty() {
        println!("No problems found");
        return;
    }
    for warning in &warnings {
        println!("warning: {}", warning);
    }
    println!("{} warning(s)", warnings.len());
}
