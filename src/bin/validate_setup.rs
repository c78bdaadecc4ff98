use autocompare::setup::{probes::default_probes, Checklist};
use autocompare::utils::logger;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "validate-setup")]
#[command(about = "Check that the local environment can build and run AutoCompare")]
struct Args {
    /// Project root containing backend/ and frontend/
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("AutoCompare Setup Validation");
    println!("{}", rule);

    let report = Checklist::new(default_probes(&args.root)).run().await;
    print!("{}", report.summary());

    std::process::exit(report.exit_code());
}
