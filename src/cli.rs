use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::data::Strategy;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Orders students' exercises on shared equipment to minimize the makespan")]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. `info`, `debug`, `exercise_scheduler=trace`)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Solve an instance file and print the results
    Solve(SolveArgs),
    /// Serve the solver over HTTP
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct SolveArgs {
    /// Path to the instance file
    pub file: PathBuf,

    /// Strategies to run, in order. Defaults to all of them.
    #[arg(long = "strategy", short = 's', value_enum)]
    pub strategies: Vec<Strategy>,

    /// Print the outcomes as JSON instead of a text report
    #[arg(long)]
    pub json: bool,
}

impl SolveArgs {
    pub fn strategies(&self) -> Vec<Strategy> {
        if self.strategies.is_empty() {
            Strategy::ALL.to_vec()
        } else {
            self.strategies.clone()
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: SocketAddr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_defaults_to_all_strategies() {
        let cli = Cli::parse_from(["exercise_scheduler", "solve", "exercises.txt"]);
        let Command::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.strategies(), Strategy::ALL.to_vec());
        assert!(!args.json);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_solve_with_strategies() {
        let cli = Cli::parse_from([
            "exercise_scheduler",
            "solve",
            "in.txt",
            "-s",
            "greedy",
            "--strategy",
            "branch-and-bound",
            "--json",
        ]);
        let Command::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.strategies(), vec![Strategy::Greedy, Strategy::BranchAndBound]);
        assert!(args.json);
    }

    #[test]
    fn test_serve_addr() {
        let cli = Cli::parse_from(["exercise_scheduler", "--log-level", "debug", "serve", "--addr", "0.0.0.0:9000"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.addr.port(), 9000);
        assert_eq!(cli.log_level, "debug");
    }
}
