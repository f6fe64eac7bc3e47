//! src/main.rs
use clap::Parser;
use mafia_dealer::cli::{self, Args};

fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    let args = Args::parse();
    log::info!("args: {args:?}");

    cli::run(args)
}
