use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "knobgen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a parameter file and print the validated sweep.
    Validate(ValidateArgs),
    /// Render a single image as a PNG.
    Frame(FrameArgs),
    /// Export sprite sheets or frame sequences for one or more sizes.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Knob parameter JSON.
    #[arg(long)]
    params: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Knob parameter JSON.
    #[arg(long)]
    params: PathBuf,

    /// Output size in pixels (square).
    #[arg(long, default_value_t = 128)]
    size: u32,

    /// Rotation in degrees (0 = 12 o'clock, clockwise positive).
    #[arg(long, conflicts_with = "index")]
    angle: Option<f64>,

    /// Frame index within the sweep (0-based).
    #[arg(long)]
    index: Option<u32>,

    /// Background: `transparent` or `#RRGGBB`.
    #[arg(long, default_value = "transparent")]
    background: knobgen::Background,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Sheet,
    Individual,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Knob parameter JSON.
    #[arg(long)]
    params: PathBuf,

    /// Export configuration JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output size in pixels; repeat for several sizes.
    #[arg(long = "size")]
    sizes: Vec<u32>,

    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// Sheet columns (sheet layout only).
    #[arg(long)]
    columns: Option<u32>,

    /// Base file name.
    #[arg(long)]
    name: Option<String>,

    /// File stem template using `{name}`, `{size}` and `{frame}`.
    #[arg(long)]
    pattern: Option<String>,

    /// Background: `transparent` or `#RRGGBB`.
    #[arg(long)]
    background: Option<knobgen::Background>,

    /// Write a JSON manifest beside each size's output.
    #[arg(long, default_value_t = false)]
    manifest: bool,

    /// Render on the calling thread only.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Worker threads for frame rendering.
    #[arg(long, env = "KNOBGEN_THREADS")]
    threads: Option<usize>,

    /// Render sizes concurrently.
    #[arg(long, default_value_t = false)]
    parallel_sizes: bool,

    /// Write the run report as JSON to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read {what} '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {what} '{}'", path.display()))
}

fn load_spec(path: &Path) -> anyhow::Result<knobgen::KnobSpec> {
    let params: knobgen::KnobParams = read_json(path, "params")?;
    Ok(knobgen::KnobSpec::from_params(&params)?)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let spec = load_spec(&args.params)?;
    let seq = knobgen::FrameSequence::new(&spec);
    println!(
        "ok: {} frame(s), {} to {} degrees, extent {:.2}",
        seq.len(),
        seq.angle_at(0),
        seq.angle_at(seq.len().saturating_sub(1)),
        spec.nominal_extent()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let spec = load_spec(&args.params)?;
    let seq = knobgen::FrameSequence::new(&spec);
    let angle = match (args.angle, args.index) {
        (Some(a), _) => a,
        (None, Some(i)) => {
            anyhow::ensure!(
                i < seq.len(),
                "index {i} is out of range for {} frame(s)",
                seq.len()
            );
            seq.angle_at(i)
        }
        (None, None) => seq.angle_at(0),
    };

    let target = knobgen::RenderTarget::square(args.size, args.background);
    let frame = knobgen::render_frame(&spec, angle, &target)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    knobgen::write_png(&args.out, &frame, &knobgen::RetryPolicy::default())
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let params: knobgen::KnobParams = read_json(&args.params, "params")?;
    let mut def: knobgen::ExportConfigDef = match &args.config {
        Some(path) => read_json(path, "export config")?,
        None => knobgen::ExportConfigDef::default(),
    };

    if !args.sizes.is_empty() {
        def.sizes = args.sizes.clone();
    }
    if let Some(out) = &args.out {
        def.output_dir = out.clone();
    }
    match (args.layout, args.columns) {
        (Some(LayoutArg::Individual), _) => def.layout = knobgen::Layout::Individual,
        (Some(LayoutArg::Sheet), columns) => {
            def.layout = knobgen::Layout::Sheet {
                columns: columns.unwrap_or(1),
            }
        }
        (None, Some(columns)) => def.layout = knobgen::Layout::Sheet { columns },
        (None, None) => {}
    }
    if let Some(name) = &args.name {
        def.base_name = name.clone();
    }
    if args.pattern.is_some() {
        def.naming = args.pattern.clone();
    }
    if let Some(bg) = args.background {
        def.background = bg;
    }
    def.manifest |= args.manifest;

    let options = knobgen::ExportOptions {
        threading: knobgen::RenderThreading {
            parallel: !args.sequential,
            threads: args.threads,
        },
        parallel_sizes: args.parallel_sizes,
        ..knobgen::ExportOptions::default()
    };

    let report = knobgen::export_params(&params, &def, &options, &knobgen::CancelToken::new())?;

    if let Some(path) = &args.report {
        let json = serde_json::to_vec_pretty(&report).context("serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("write report '{}'", path.display()))?;
    }

    for size in &report.sizes {
        match &size.outcome {
            knobgen::SizeOutcome::Success { paths } => {
                for p in paths {
                    eprintln!("wrote {}", p.display());
                }
            }
            knobgen::SizeOutcome::Failed { kind, message } => {
                eprintln!("size {}: {kind:?} error: {message}", size.size);
            }
            knobgen::SizeOutcome::Cancelled => eprintln!("size {}: cancelled", size.size),
        }
    }
    anyhow::ensure!(report.all_succeeded(), "export finished with failures");
    Ok(())
}
