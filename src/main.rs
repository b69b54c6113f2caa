use anyhow::Result;
use clap::Parser;
use log::info;
use mandelbench::bench::{registry, runner};
use mandelbench::field::FieldParams;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mandelbench",
    about = "Benchmark Mandelbrot escape-time strategies and render their fields"
)]
struct Cli {
    /// Image width in pixels.
    #[arg(long, default_value_t = 1400)]
    width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Iteration bound per pixel.
    #[arg(long, default_value_t = 256)]
    max_iterations: u32,

    /// Run only the strategies with these slugs (comma separated),
    /// e.g. --only scalar,vectorized,sqlite.
    #[arg(long, value_delimiter = ',')]
    only: Option<Vec<String>>,

    /// Directory for the rendered PNG images.
    #[arg(long, default_value = "images")]
    out_dir: PathBuf,

    /// Skip writing images.
    #[arg(long)]
    no_images: bool,

    /// Write a JSON report to this path.
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = FieldParams::new(cli.width, cli.height, cli.max_iterations)?;

    let mut strategies = registry();
    if let Some(only) = &cli.only {
        strategies.retain(|s| only.iter().any(|wanted| wanted == s.slug()));
        if strategies.is_empty() {
            return Err(anyhow::anyhow!(
                "no strategy matches --only {}",
                only.join(",")
            ));
        }
    }

    runner::print_header(&params);
    let out_dir = if cli.no_images {
        None
    } else {
        Some(cli.out_dir.as_path())
    };
    let report = runner::run_all(&strategies, &params, out_dir);
    runner::print_results(&report);

    if let Some(path) = &cli.json {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!("wrote report to {}", path.display());
    }

    Ok(())
}
