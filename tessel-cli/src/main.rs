use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tessel", version, about = "Render t:if / t:each / t:text templates")]
struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markup template against a context.
    Render {
        /// Path to the markup template
        template: PathBuf,
        /// JSON object whose entries become context variables
        #[arg(long)]
        context: Option<PathBuf>,
        /// Extra string binding, NAME=VALUE (repeatable, overrides --context)
        #[arg(long = "var", value_parser = tessel_cli::parse_var)]
        vars: Vec<(String, String)>,
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tessel_cli::init_logging(cli.verbose);
    match cli.command {
        Commands::Render {
            template,
            context,
            vars,
            out,
        } => tessel_cli::render_cmd(&template, context.as_deref(), &vars, out.as_deref())?,
    }
    Ok(())
}
