// src/main.rs
use anyhow::Result;
use clap::Parser;
use vmerge::logging::init_tracing;
use vmerge::{Args, run};

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_tracing(args.log.as_deref())?;
    run(args)
}
