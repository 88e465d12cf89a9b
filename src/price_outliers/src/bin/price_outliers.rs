use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use price_outliers::{
    batch::{BatchJob, process_all},
    config::{AppConfig, AnalysisParams, load_config_path, normalize_extension},
    pipeline::analyze_file,
    report,
};
use rand::{SeedableRng, rngs::StdRng};
use shared_utils::{
    env::{get_optional_env_parsed, get_optional_env_var},
    logging::init_tracing,
};

const CONFIG_ENV: &str = "PRICE_OUTLIERS_CONFIG";
const SEED_ENV: &str = "PRICE_OUTLIERS_SEED";
const LOG_ENV: &str = "PRICE_OUTLIERS_LOG";

#[derive(Parser)]
#[command(version, about = "Random-window outlier and deviation analysis for price tables")]
struct Cli {
    /// Path to a TOML config file (falls back to $PRICE_OUTLIERS_CONFIG)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Output format for results on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Cmd {
    /// Analyze one random window of a single file
    Single {
        /// File to analyze (overrides [single].source_path)
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Analyze one random window of every matching file under a directory
    Batch {
        /// Directory to scan (overrides [batch].root_dir)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// File extension to pick up, e.g. "xlsx" (overrides [batch].extension)
        #[arg(long)]
        extension: Option<String>,

        #[command(flatten)]
        tuning: Tuning,
    },
}

#[derive(Args)]
struct Tuning {
    /// Z-score threshold; |z| strictly above it is an outlier
    #[arg(long)]
    zscore_threshold: Option<f64>,

    /// Percentage deviation threshold; strictly above it is flagged
    #[arg(long)]
    pct_threshold: Option<f64>,

    /// RNG seed for reproducible windows (falls back to $PRICE_OUTLIERS_SEED)
    #[arg(long)]
    seed: Option<u64>,
}

impl Tuning {
    fn apply(&self, mut params: AnalysisParams) -> Result<AnalysisParams> {
        if let Some(z) = self.zscore_threshold {
            params.zscore_threshold = z;
        }
        if let Some(p) = self.pct_threshold {
            params.pct_threshold = p;
        }
        params.validate()?;
        Ok(params)
    }

    fn rng(&self) -> Result<StdRng> {
        let seed = match self.seed {
            Some(s) => Some(s),
            None => get_optional_env_parsed::<u64>(SEED_ENV)?,
        };
        Ok(match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        })
    }
}

fn load_config(flag: Option<PathBuf>) -> Result<AppConfig> {
    match flag.or_else(|| get_optional_env_var(CONFIG_ENV).map(PathBuf::from)) {
        Some(path) => load_config_path(&path),
        None => Ok(AppConfig::default()),
    }
}

fn main() -> Result<()> {
    init_tracing(LOG_ENV, "info");
    let cli = Cli::parse();
    let cfg = load_config(cli.config)?;

    match cli.cmd {
        Cmd::Single { file, tuning } => {
            let path = file
                .or_else(|| cfg.single.source_path.clone())
                .ok_or_else(|| anyhow!("no input file: pass --file or set [single].source_path"))?;
            let params = tuning.apply(cfg.single.params())?;
            let mut rng = tuning.rng()?;

            let analysis = analyze_file(&path, &params, &mut rng)
                .with_context(|| format!("failed to analyze {}", path.display()))?;

            match cli.format {
                OutputFormat::Text => print!("{}", report::render_file_analysis(&analysis)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
            }
        }

        Cmd::Batch {
            root,
            extension,
            tuning,
        } => {
            let root_dir = root
                .or_else(|| cfg.batch.root_dir.clone())
                .ok_or_else(|| anyhow!("no root directory: pass --root or set [batch].root_dir"))?;
            let extension = match extension {
                Some(e) => normalize_extension(&e),
                None => cfg.batch.extension(),
            };
            if extension.is_empty() {
                return Err(anyhow!("batch extension cannot be empty"));
            }
            let job = BatchJob {
                root_dir,
                extension,
                params: tuning.apply(cfg.batch.params())?,
            };
            let mut rng = tuning.rng()?;

            let batch = process_all(&job, &mut rng)?;

            match cli.format {
                OutputFormat::Text => {
                    for analysis in &batch.results {
                        println!("{}", report::render_file_analysis(analysis));
                    }
                    for skipped in &batch.skipped {
                        eprintln!("SKIPPED: {} - {}", skipped.path.display(), skipped.reason);
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&batch)?),
            }
            // stderr so the summary never mixes with machine-readable stdout
            eprintln!("{}", report::render_batch_summary(&batch));
        }
    }

    Ok(())
}
