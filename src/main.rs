use std::path::PathBuf;

use anyhow::{anyhow, Result};
use getopts::Options;
use serde_json::Value;
use tracing::{debug, error, info};

use ragged_poly::challenge::{ManyTestcases, Testcase};
use ragged_poly::common::setup_logging;
use ragged_poly::settings::Settings;

fn main() -> Result<()> {
    let args: Vec<_> = std::env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.parsing_style(getopts::ParsingStyle::FloatingFrees);
    opts.optflag("h", "help", "print this help menu");
    opts.optflag(
        "V",
        "version",
        &format!("print the version of {}", env!("CARGO_PKG_NAME")),
    );
    opts.optflag("v", "verbose", "log the intermediate steps to stderr");
    opts.optopt(
        "t",
        "threads",
        "number of worker threads, one per CPU by default",
        "THREADS",
    );

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{e}");
            usage_and_exit(&opts, &program);
        }
    };

    if matches.opt_present("help") {
        usage_and_exit(&opts, &program);
    }

    if matches.opt_present("version") {
        eprintln!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    let threads: Option<usize> = matches
        .opt_get::<usize>("threads")
        .map_err(|e| anyhow!("THREADS is not a number: {e}"))?;
    let settings = Settings {
        verbose: matches.opt_present("verbose"),
        threads,
    };
    setup_logging(&settings);

    if settings.verbose {
        let mut example = ManyTestcases::new();
        example.insert(uuid::Uuid::default(), Testcase::default());
        debug!(
            "example testcases: {}",
            serde_json::to_string(&example).unwrap_or_default()
        );
    }

    if matches.free.len() != 1 {
        error!("no JSON file was provided for the challenge definition");
        usage_and_exit(&opts, &program);
    }
    let path: PathBuf = matches.free[0].clone().into();
    info!("path of the challenge definition: {:?}", path);

    let raw_text = std::fs::read_to_string(&path)
        .inspect_err(|e| error!("could not read the challenge definition file: {e}"))?;
    let json_value: Value = serde_json::from_str(&raw_text).inspect_err(|e| {
        error!("could not parse the text of the challenge definition file as JSON: {e}")
    })?;
    debug!("challenge definition: {json_value:#}");

    // print our response to stdout
    println!(
        "{}",
        ragged_poly::challenge::run_challenges(&json_value, settings)?
    );

    Ok(())
}

fn usage_and_exit(opts: &Options, program: &str) -> ! {
    let brief = format!("Usage: {program} [options] FILE");
    eprint!("{}", opts.usage(&brief));
    std::process::exit(1)
}
