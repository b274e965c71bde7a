//! quadsub CLI - Catmull-Clark subdivision from the command line.
//!
//! Usage: quadsub <COMMAND> [OPTIONS]
//!
//! Run `quadsub --help` for available commands.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};

use quadsub::algo::subdivide::{catmull_clark_with_progress, BoundaryRule, SubdivideOptions};
use quadsub::algo::Progress;
use quadsub::error::MeshError;
use quadsub::io;
use quadsub::mesh::QuadMesh;

#[derive(Parser)]
#[command(name = "quadsub")]
#[command(author, version, about = "Catmull-Clark subdivision for quad meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file (.obj or .ply)
        input: PathBuf,
    },

    /// Subdivide a quad mesh
    Subdivide {
        /// Input mesh file (.obj or .ply)
        input: PathBuf,

        /// Output mesh file (.obj or .ply)
        output: PathBuf,

        /// Number of subdivision passes
        #[arg(short, long, default_value = "1")]
        iterations: usize,

        /// Accept open edges (edge points at midpoints)
        #[arg(long)]
        open_boundary: bool,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Write a cube to start from
    Cube {
        /// Output mesh file (.obj or .ply)
        output: PathBuf,

        /// Edge length
        #[arg(short, long, default_value = "1.0")]
        size: f64,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.downcast_ref::<MeshError>().and_then(hint_for) {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}

/// Suggest a fix for errors caused by the input mesh itself.
fn hint_for(err: &MeshError) -> Option<&'static str> {
    if !err.is_malformed_mesh() {
        return None;
    }
    Some(match err {
        MeshError::BoundaryEdge { .. } => "the mesh is open; pass --open-boundary to subdivide it anyway",
        MeshError::NonQuadFace { .. } => "only all-quad meshes can be subdivided",
        _ => "run `quadsub info` on the input to check its topology",
    })
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }

        Commands::Subdivide {
            input,
            output,
            iterations,
            open_boundary,
            sequential,
        } => {
            cmd_subdivide(&input, &output, iterations, open_boundary, sequential)?;
        }

        Commands::Cube { output, size } => {
            cmd_cube(&output, size)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Only ever move forward
        let previous = max_percent.fetch_max(percent, Ordering::Relaxed);
        if percent <= previous && percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {:<24}", bar, space, percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());
    println!("Edges: {}", mesh.num_edges());
    println!("Euler characteristic: {}", mesh.euler_characteristic());

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    let boundary = mesh.num_boundary_edges();
    if boundary == 0 {
        println!("Topology: Closed (no boundary)");
    } else {
        println!("Topology: Open ({} boundary edges)", boundary);
    }

    match mesh.validate() {
        Ok(()) => println!("Valid: yes"),
        Err(e) => println!("Valid: no ({})", e),
    }

    Ok(())
}

fn cmd_subdivide(
    input: &PathBuf,
    output: &PathBuf,
    iterations: usize,
    open_boundary: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if iterations == 0 {
        return Err(MeshError::invalid_param("iterations", iterations, "must be at least 1").into());
    }

    let mut mesh = io::load(input)?;

    println!("Loaded: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());

    let boundary = if open_boundary {
        BoundaryRule::Midpoint
    } else {
        BoundaryRule::Reject
    };
    let options = SubdivideOptions::new()
        .with_boundary(boundary)
        .with_parallel(!sequential);

    let mode = if sequential { "sequential" } else { "parallel" };
    println!("Applying Catmull-Clark subdivision ({} passes, {})...", iterations, mode);

    let overall = Arc::new(create_progress());
    let start = Instant::now();
    for pass in 0..iterations {
        let progress = Progress::within(&overall, pass, iterations);
        mesh = catmull_clark_with_progress(&mesh, &options, &progress)?;
        log::debug!("pass {} done: {} faces", pass + 1, mesh.num_faces());
    }
    let elapsed = start.elapsed();

    println!("Result: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());
    io::save(&mesh, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

fn cmd_cube(output: &PathBuf, size: f64) -> Result<(), Box<dyn std::error::Error>> {
    if !(size.is_finite() && size > 0.0) {
        return Err(MeshError::invalid_param("size", size, "must be positive").into());
    }

    let cube = QuadMesh::cube(size);
    io::save(&cube, output)?;
    println!("Saved: {} ({} vertices, {} faces)", output.display(), cube.num_vertices(), cube.num_faces());

    Ok(())
}
