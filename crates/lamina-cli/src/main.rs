//! lamina CLI - leaf-plate mask synthesis front end.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use lamina::{build_mask, plan, stl, MaskConfig};

#[derive(Parser)]
#[command(name = "lamina")]
#[command(about = "Synthesize a printable leaf-plate face mask from a head scan", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a mask from a head scan
    Build {
        /// Input head mesh (binary STL)
        input: PathBuf,
        /// Output mask mesh (binary STL)
        output: PathBuf,
        /// Mask parameters (TOML); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Also write the construction plan as JSON
        #[arg(long)]
        plan: Option<PathBuf>,
    },
    /// Display information about an STL mesh
    Info {
        /// Path to the mesh (binary STL)
        file: PathBuf,
    },
    /// Write a default configuration file
    Init {
        /// Where to write the config
        #[arg(default_value = "mask.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            config,
            plan,
        } => build(&input, &output, config.as_deref(), plan.as_deref()),
        Commands::Info { file } => show_info(&file),
        Commands::Init { output } => init_config(&output),
    }
}

fn build(
    input: &PathBuf,
    output: &PathBuf,
    config_path: Option<&std::path::Path>,
    plan_path: Option<&std::path::Path>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            MaskConfig::from_toml_str(&text)?
        }
        None => MaskConfig::default(),
    };
    config.validate()?;

    let head = stl::read_stl_file(input).with_context(|| format!("reading {}", input.display()))?;
    println!(
        "Loaded {} ({} triangles)",
        input.display(),
        head.num_triangles()
    );

    if let Some(path) = plan_path {
        let plan = plan::build_plan(&config)?;
        fs::write(path, plan.graph.to_json()?)?;
        println!(
            "Wrote plan with {} nodes to {}",
            plan.graph.nodes.len(),
            path.display()
        );
    }

    let mask = build_mask(&head, &config)?;
    stl::write_stl_file(output, &mask)?;
    println!(
        "Wrote {} ({} triangles, {:.1} mm^3)",
        output.display(),
        mask.num_triangles(),
        mask.volume()
    );
    Ok(())
}

fn show_info(file: &PathBuf) -> Result<()> {
    let mesh = stl::read_stl_file(file).with_context(|| format!("reading {}", file.display()))?;
    println!("File:           {}", file.display());
    println!("Triangles:      {}", mesh.num_triangles());
    println!("Vertices:       {}", mesh.num_vertices());
    if let Some((lo, hi)) = mesh.bounds() {
        println!(
            "Bounds:         [{:.2}, {:.2}, {:.2}] .. [{:.2}, {:.2}, {:.2}]",
            lo.x, lo.y, lo.z, hi.x, hi.y, hi.z
        );
    }
    println!("Volume:         {:.2} mm^3", mesh.volume());
    println!("Surface area:   {:.2} mm^2", mesh.surface_area());
    let open_edges = mesh.boundary_edge_count();
    println!(
        "Boundary edges: {} ({})",
        open_edges,
        if open_edges == 0 { "closed" } else { "open" }
    );
    Ok(())
}

fn init_config(output: &PathBuf) -> Result<()> {
    let config = MaskConfig::default();
    fs::write(output, config.to_toml_string())
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote default configuration to {}", output.display());
    Ok(())
}
