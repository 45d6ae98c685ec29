use env_logger::{Builder, Env};
use log::{error, info};
use perch::commands::{execute, parse_args};
use std::env;
use std::process::exit;

fn main() {
    let _log_init: Result<(), _> = Builder::from_env(Env::default().filter_or("RUST_LOG", "info"))
        .is_test(false)
        .try_init();
    let outcome = parse_args(env::args().skip(1)).and_then(execute);
    match outcome {
        Ok(output) => {
            info!("{output}");
        }
        Err(err) => {
            error!("error: {err:#}");
            exit(1);
        }
    }
}
