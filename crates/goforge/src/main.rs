//! Goforge CLI - bootstrap Go projects from templates

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use goforge_core::{config, templates, tui, Template, TempWorkspace};

#[derive(Parser, Debug)]
#[command(name = "goforge")]
#[command(about = "Bootstrap Go projects from templates")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new Go project (interactive)
    Create {
        /// Project name; prompted interactively when omitted
        name: Option<String>,
    },
    /// List available templates
    Templates,
    /// Manage disposable projects in the temp workspace
    Temp {
        #[command(subcommand)]
        command: TempCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TempCommand {
    /// Create a temporary project (interactive)
    New,
    /// List temporary projects
    List,
    /// Delete a temporary project
    Rm { name: String },
    /// Delete all temporary projects
    Clean,
    /// Move a temporary project to a permanent location
    Promote { name: String, target: PathBuf },
}

/// Dev diagnostics via RUST_LOG, stderr only; defaults to warn.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully outside the TUI
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let catalog = templates::builtin_templates();

    match args.command {
        Some(Command::Create { name }) => {
            let result = tui::create::run(catalog, name).await;
            let _ = console::Term::stderr().show_cursor();
            result
        }
        Some(Command::Templates) => {
            print_templates(&catalog);
            Ok(())
        }
        Some(Command::Temp { command }) => run_temp(command, catalog).await,
        None => {
            Args::command().print_help()?;
            println!();
            print_templates(&catalog);
            Ok(())
        }
    }
}

fn print_templates(catalog: &[Arc<dyn Template>]) {
    println!("{}", "Available templates:".bold());
    for template in catalog {
        println!("  - {:<10} {}", template.name().cyan(), template.description());
    }
}

async fn run_temp(command: TempCommand, catalog: Vec<Arc<dyn Template>>) -> Result<()> {
    let root = config::resolve_temp_root()?;
    let workspace = TempWorkspace::new(root);

    match command {
        TempCommand::New => {
            let result = tui::temp::run(Arc::new(workspace), catalog).await;
            let _ = console::Term::stderr().show_cursor();
            result
        }
        TempCommand::List => {
            let projects = workspace.list().await?;
            if projects.is_empty() {
                println!("No temporary projects.");
                return Ok(());
            }
            for project in projects {
                println!(
                    "  {:<20} {:<10} {}  {}",
                    project.name.bold(),
                    project.template,
                    project.created_at.format("%Y-%m-%d %H:%M"),
                    project.path.display().to_string().dimmed()
                );
            }
            Ok(())
        }
        TempCommand::Rm { name } => {
            workspace.delete(&name).await?;
            println!("{} Deleted temp project '{}'", "✓".green(), name);
            Ok(())
        }
        TempCommand::Clean => {
            workspace.clean_all().await?;
            println!("{} Temp workspace cleaned", "✓".green());
            Ok(())
        }
        TempCommand::Promote { name, target } => {
            workspace.promote(&name, &target).await?;
            println!(
                "{} Promoted '{}' to {}",
                "✓".green(),
                name,
                target.display()
            );
            Ok(())
        }
    }
}
