mod cli;
mod data;
mod error;
mod parser;
mod report;
mod server;
mod solver;

use clap::Parser;

use crate::cli::{Cli, Command, SolveArgs};

fn run_solve(args: &SolveArgs) -> anyhow::Result<()> {
    let instance = parser::load_instance(&args.file)?;
    let outcomes = solver::solve(&instance, &args.strategies());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        print!("{}", report::render_outcomes(&outcomes));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level)).init();

    match cli.command {
        Command::Solve(args) => run_solve(&args),
        Command::Serve(args) => server::run_server(args.addr).await,
    }
}
