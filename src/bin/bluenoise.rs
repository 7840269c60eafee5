use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use u_bluenoise::pattern::{
    optimize, spectrum_luma8, to_luma8, ChannelSelect, EnergyMode, EnergyParams, LumaImage,
    Pattern,
};
use u_bluenoise::sa::AnnealConfig;

#[derive(Parser, Debug)]
#[command(name = "bluenoise", version, about = "Generate a blue-noise dither pattern")]
struct Cli {
    /// Side length of the pattern.
    #[arg(long, default_value_t = 16)]
    size: usize,

    /// Channels per cell.
    #[arg(long, default_value_t = 1)]
    dims: usize,

    /// Annealing iteration budget.
    #[arg(long, default_value_t = 2000)]
    iterations: usize,

    /// Spatial kernel width.
    #[arg(long, default_value_t = 2.1)]
    sigma_i: f64,

    /// Value kernel width.
    #[arg(long, default_value_t = 1.0)]
    sigma_s: f64,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Recompute the full energy for every candidate instead of updating it.
    #[arg(long)]
    full_energy: bool,

    /// Directory receiving the PNG files.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if cli.size == 0 || cli.dims == 0 {
        anyhow::bail!("size and dims must be positive");
    }

    let params = EnergyParams::default()
        .with_sigma_i(cli.sigma_i)
        .with_sigma_s(cli.sigma_s);
    params.validate()?;

    let mut config = AnnealConfig::default().with_max_iterations(cli.iterations);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;

    let mode = if cli.full_energy {
        EnergyMode::Full
    } else {
        EnergyMode::Incremental
    };

    let initial = match cli.seed {
        Some(seed) => {
            use rand::SeedableRng;
            Pattern::random(cli.size, cli.dims, &mut rand::rngs::StdRng::seed_from_u64(seed))
        }
        None => Pattern::new(cli.size, cli.dims),
    };

    let result = optimize(initial.clone(), params, mode, config);
    tracing::info!(
        initial = result.initial_cost,
        best = result.best_cost,
        iterations = result.iterations,
        "optimization done"
    );

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir '{}'", cli.out_dir.display()))?;

    let select = ChannelSelect::Mean;
    let outputs = [
        ("initial.png", to_luma8(&initial, select)),
        ("optimized.png", to_luma8(&result.best.pattern, select)),
        ("initial_fourier.png", spectrum_luma8(&initial, select)),
        ("optimized_fourier.png", spectrum_luma8(&result.best.pattern, select)),
    ];
    for (name, image) in &outputs {
        write_png(&cli.out_dir.join(name), image)?;
    }

    eprintln!(
        "energy {:.6} -> {:.6} in {} iterations",
        result.initial_cost, result.best_cost, result.iterations
    );
    Ok(())
}

fn write_png(path: &std::path::Path, image: &LumaImage) -> anyhow::Result<()> {
    image
        .save_png(path)
        .with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
