//! carve CLI - terminal front end for the CSG scene-graph editor.
//!
//! Provides a line-oriented interactive editor plus a project file inspector.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod session;

#[derive(Parser)]
#[command(name = "carve")]
#[command(about = "Interactive CSG scene-graph editor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive editor
    Edit {
        /// Path to a project JSON file to open
        file: Option<PathBuf>,
    },
    /// Display information about a project file
    Info {
        /// Path to the project JSON file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Edit { file }) => session::run(file),
        Some(Commands::Info { file }) => show_info(&file),
        None => session::run(None),
    }
}

fn show_info(file: &PathBuf) -> Result<()> {
    use carve_eval::forest_bounds;
    use carve_scene::Project;

    let text = std::fs::read_to_string(file)?;
    let mut project = Project::new();
    project.import_json(&text)?;

    println!("carve project: {}", file.display());
    println!("  Nodes: {}", project.store.len());
    println!("  Roots: {}", project.store.roots().len());

    let bounds = forest_bounds(&project.store);
    if !bounds.is_empty() {
        println!("\nForest:");
        for (id, aabb) in &bounds {
            let name = project
                .node(id)
                .map(|n| n.name.as_str())
                .unwrap_or("unnamed");
            let (w, h, d) = aabb.size();
            println!("  {} ({}): bounds {:.2} x {:.2} x {:.2}", name, id, w, h, d);
        }
    }

    Ok(())
}
