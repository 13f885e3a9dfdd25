use clap::Parser;
use evalnet::config::{Precision, RunConfig, Topology};
use evalnet::{pipeline, util};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(about, long_about = None)]
struct TrainArgs {
    #[clap(long)]
    input_path: PathBuf,
    #[clap(long, default_value = "0.2")]
    test_fraction: f64,
    #[clap(long, default_value = "42")]
    seed: u64,
    #[clap(long, default_value = "10")]
    epochs: usize,
    #[clap(long, default_value = "128")]
    batch_size: usize,
    #[clap(long, default_value = "A")]
    topology: Topology,
    #[clap(long, default_value = "f64")]
    precision: Precision,
    #[clap(long, default_value = "0.001")]
    learning_rate: f64,
    #[clap(long)]
    init_seed: Option<u64>,
    #[clap(long)]
    max_report_rows: Option<usize>,
}

fn main() -> ExitCode {
    util::init_globals();
    let args = TrainArgs::parse();

    let config = RunConfig {
        input_path: args.input_path,
        test_fraction: args.test_fraction,
        seed: args.seed,
        epochs: args.epochs,
        batch_size: args.batch_size,
        topology: args.topology,
        precision: args.precision,
        learning_rate: args.learning_rate,
        init_seed: args.init_seed,
        max_report_rows: args.max_report_rows,
    };

    match pipeline::run(&config, &mut std::io::stdout()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
