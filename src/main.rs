#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use log::{info, warn};
use torus_life::board::{load_board, save_board};
use torus_life::torus::{ScanKernel, StepperConfig, evolve, generations_from_i64};

const USAGE: &str = "usage: torus-life <gens> <input> <output> [--threads N] [--max-threads N] [--kernel table|direct] [--verify]";

struct MainArgs {
    gens_max: u64,
    input: PathBuf,
    output: PathBuf,
    config: StepperConfig,
    verify: bool,
}

fn parse_args() -> Result<MainArgs, Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    let next_arg = |i: usize, flag: &str| -> Result<&str, String> {
        args.get(i)
            .map(String::as_str)
            .ok_or_else(|| format!("{flag} requires a value\n{USAGE}"))
    };
    let parse_count = |text: &str, flag: &str| -> Result<usize, String> {
        text.parse()
            .map_err(|_| format!("{flag} requires a positive integer, got {text:?}"))
    };

    let mut positional = Vec::new();
    let mut config = StepperConfig::default();
    let mut verify = false;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--threads" => {
                i += 1;
                let n = parse_count(next_arg(i, "--threads")?, "--threads")?;
                config = config.thread_count(n);
            }
            "--max-threads" => {
                i += 1;
                let n = parse_count(next_arg(i, "--max-threads")?, "--max-threads")?;
                config = config.max_threads(n);
            }
            "--kernel" => {
                i += 1;
                let kernel = match next_arg(i, "--kernel")?.to_ascii_lowercase().as_str() {
                    "table" => ScanKernel::Table,
                    "direct" => ScanKernel::Direct,
                    other => {
                        return Err(
                            format!("unknown kernel: {other} (expected table or direct)").into(),
                        );
                    }
                };
                config = config.kernel(kernel);
            }
            "--verify" => verify = true,
            flag if flag.starts_with("--") => {
                return Err(format!("unknown argument: {flag}\n{USAGE}").into());
            }
            other => positional.push(other.to_owned()),
        }
        i += 1;
    }

    let [gens, input, output]: [String; 3] = positional
        .try_into()
        .map_err(|_| format!("expected three positional arguments\n{USAGE}"))?;
    let gens: i64 = gens
        .parse()
        .map_err(|_| format!("generation count must be an integer, got {gens:?}"))?;

    Ok(MainArgs {
        gens_max: generations_from_i64(gens)?,
        input: input.into(),
        output: output.into(),
        config,
        verify,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = parse_args()?;

    let initial = load_board(&args.input)?;
    info!(
        "loaded {}x{} board with {} live cells from {}",
        initial.rows(),
        initial.cols(),
        initial.population(),
        args.input.display()
    );
    let reference_input = args.verify.then(|| initial.clone());

    let start = Instant::now();
    let result = evolve(initial, args.gens_max, &args.config)?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        "{} generations in {elapsed_ms:.3} ms, population {}",
        args.gens_max,
        result.population()
    );

    if let Some(input) = reference_input {
        let reference_config = StepperConfig::default()
            .thread_count(1)
            .kernel(ScanKernel::Direct);
        let reference = evolve(input, args.gens_max, &reference_config)?;
        if reference == result {
            info!("verify: MATCH against single-thread direct kernel");
        } else {
            warn!("verify: MISMATCH against single-thread direct kernel");
        }
    }

    save_board(&args.output, &result)?;
    info!("wrote {}", args.output.display());
    Ok(())
}
