use clap::Parser;
use goal_resolver::cli::commands::{cmd_analyze, cmd_inspect, cmd_resolve};
use goal_resolver::cli::config::{Cli, Commands, init_tracing, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Resolve {
            input,
            goal,
            format,
            trace,
            top,
        } => {
            let all_matched = cmd_resolve(&input, &goal, &format, trace.as_deref(), top, &config)?;
            if !all_matched {
                std::process::exit(1);
            }
        }
        Commands::Inspect { input, format, all } => {
            cmd_inspect(&input, &format, all, &config)?;
        }
        Commands::Analyze { request } => {
            cmd_analyze(&request, &config)?;
        }
    }

    Ok(())
}
