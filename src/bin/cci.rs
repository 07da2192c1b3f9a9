use anyhow::Result;
use cci_rs::charts::PanelSet;
use cci_rs::viz::Infographic;
use cci_rs::{stats, storage};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cci",
    version,
    about = "Load, reshape & visualize World Bank climate indicators into a composed infographic"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose the four-panel infographic (and optionally export data and print stats).
    Render(RenderArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Directory holding the input exports.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
    /// Output image path (.png, or .svg for vector output).
    #[arg(long, default_value = "angola_climate.png")]
    out: PathBuf,
    /// Width of the figure in pixels (default 3600 = 12in at 300dpi).
    #[arg(long, default_value_t = 3600)]
    width: u32,
    /// Height of the figure in pixels (default 3600 = 12in at 300dpi).
    #[arg(long, default_value_t = 3600)]
    height: u32,
    /// Locale for tick-label grouping (en, de, fr, ...).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Save the cleaned indicator observations to file (format inferred by --format or extension).
    #[arg(long)]
    export: Option<PathBuf>,
    /// Export format (csv or json). If omitted, inferred from --export extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print grouped statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let panels = PanelSet::with_data_dir(&args.data_dir);
    let figure = Infographic {
        width: args.width,
        height: args.height,
        out_path: args.out.clone(),
        locale: args.locale.clone(),
        ..Default::default()
    };
    figure.compose(&panels)?;
    eprintln!("Wrote infographic to {}", args.out.display());

    if args.export.is_some() || args.stats {
        let observations = panels.indicator_observations()?;

        if let Some(path) = args.export.as_ref() {
            let fmt = match args.format {
                Some(OutFormat::Csv) => "csv",
                Some(OutFormat::Json) => "json",
                None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
            }
            .to_ascii_lowercase();
            match fmt.as_str() {
                "csv" => storage::save_csv(&observations, path)?,
                "json" => storage::save_json(&observations, path)?,
                other => anyhow::bail!("unsupported format: {}", other),
            }
            eprintln!("Saved {} rows to {}", observations.len(), path.display());
        }

        if args.stats {
            let summaries = stats::grouped_summary(&observations);
            for s in summaries {
                println!(
                    "{} • {}  count={} missing={}  min={} max={} mean={} median={}",
                    s.key.country_code,
                    s.key.indicator_code,
                    s.count,
                    s.missing,
                    fmt_opt(s.min),
                    fmt_opt(s.max),
                    fmt_opt(s.mean),
                    fmt_opt(s.median)
                );
            }
        }
    }

    Ok(())
}
