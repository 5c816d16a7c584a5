use clap::Parser;
use gateway_e2e::cli::commands::{cmd_list, cmd_run};
use gateway_e2e::cli::config::{load_config, Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            env,
            scenario,
            format,
            output,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let all_passed = cmd_run(
                &config,
                &env,
                scenario.as_deref(),
                &format,
                output.as_deref(),
                cli.verbose,
            )?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::List => {
            cmd_list();
        }
    }

    Ok(())
}
