use block_core::{generate, Catalog, GenerationResult, SessionConfig};
use glam::IVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Command-line options. Anything given here overrides the session config.
#[derive(Debug, Default)]
struct CliArgs {
    catalog: Option<PathBuf>,
    config: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    seed: Option<u64>,
}

impl CliArgs {
    /// Supported args:
    /// - `--catalog <path>` - Block catalog JSON (required)
    /// - `--config <path>` - Session config JSON
    /// - `--width <N>` / `--height <N>` - Region size
    /// - `--seed <N>` - RNG seed
    fn parse(args: &[String]) -> Self {
        let mut cli = CliArgs::default();
        let mut i = 1; // Skip program name

        while i < args.len() {
            // A following flag is not a value.
            let value = args.get(i + 1).filter(|v| !v.starts_with("--"));
            match (args[i].as_str(), value) {
                ("--catalog", Some(v)) => cli.catalog = Some(PathBuf::from(v)),
                ("--config", Some(v)) => cli.config = Some(PathBuf::from(v)),
                ("--width", Some(v)) => cli.width = parse_number("--width", v),
                ("--height", Some(v)) => cli.height = parse_number("--height", v),
                ("--seed", Some(v)) => cli.seed = parse_number("--seed", v),
                (flag, None) if flag.starts_with("--") => {
                    tracing::warn!("{} requires an argument", flag);
                    i += 1;
                    continue;
                }
                (other, _) => {
                    tracing::warn!("Ignoring unknown argument: {}", other);
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        cli
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Option<T> {
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!("{} requires a number, got '{}'", flag, value);
            None
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("block_core=info,block_studio=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli = CliArgs::parse(&args);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(width) = cli.width {
        config.generation.width = width;
    }
    if let Some(height) = cli.height {
        config.generation.height = height;
    }
    if let Some(seed) = cli.seed {
        config.generation.seed = seed;
    }

    let catalog_path = cli
        .catalog
        .as_ref()
        .ok_or("missing --catalog <path>")?;
    let catalog = Catalog::load(catalog_path, &config)?;
    let cache = catalog.build_cache()?;
    tracing::info!("Adjacency cache ready: {} entries", cache.len());

    let mut rng = StdRng::seed_from_u64(config.generation.seed);
    let result = generate(&cache, catalog.blocks(), &config.generation, &mut rng)?;

    print!("{}", render_layout(&result, config.generation.width, config.generation.height));
    Ok(())
}

/// One line per row, composite keys padded to a common width.
fn render_layout(result: &GenerationResult, width: u32, height: u32) -> String {
    let key_at = |x: u32, y: u32| {
        result
            .grid
            .get(IVec2::new(x as i32, y as i32))
            .map(|b| b.key())
            .unwrap_or_else(|| ".".to_string())
    };
    let column = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| key_at(x, y).len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for y in 0..height {
        let row: Vec<String> = (0..width)
            .map(|x| format!("{:<column$}", key_at(x, y)))
            .collect();
        out.push_str(row.join(" ").trim_end());
        out.push('\n');
    }
    out
}
