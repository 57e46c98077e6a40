use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use montage::{
    Affine, Clip, ClipMetadata, ComposeMode, ComposeOpts, FfprobeInspector, ManifestInspector,
    MediaInspector, Size,
};

#[derive(Parser, Debug)]
#[command(name = "montage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a composition from a manifest and print it as JSON.
    Compose(ComposeArgs),
    /// Print manifest metadata for media files (requires `ffprobe` and the `media-ffmpeg` feature).
    Probe(ProbeArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Composition mode.
    #[arg(long, value_enum, default_value_t = ModeChoice::CrossFade)]
    mode: ModeChoice,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Drop all audio tracks.
    #[arg(long)]
    no_audio: bool,

    /// Probe sources with ffprobe instead of reading the manifest's `media` table.
    #[arg(long)]
    probe: bool,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Media files to inspect.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    CrossFade,
    CrossFadeWithPip,
    TwoClipPip,
}

/// On-disk request: source locations plus their pre-probed metadata.
#[derive(Debug, serde::Deserialize)]
struct Manifest {
    sources: Vec<String>,
    #[serde(default)]
    overlay: Option<String>,
    #[serde(default)]
    render_size: Option<Size>,
    #[serde(default)]
    media: ManifestInspector,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn read_manifest(path: &Path) -> anyhow::Result<Manifest> {
    let f = File::open(path).with_context(|| format!("open manifest '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f)).context("parse manifest JSON")
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let manifest = read_manifest(&args.in_path)?;
    let mode = match args.mode {
        ModeChoice::CrossFade => ComposeMode::CrossFade,
        ModeChoice::CrossFadeWithPip => ComposeMode::CrossFadeWithPip,
        ModeChoice::TwoClipPip => ComposeMode::TwoClipPip,
    };
    let opts = ComposeOpts {
        keep_audio: !args.no_audio,
        render_size: manifest.render_size,
    };

    let media_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let probe = |source: &str| -> anyhow::Result<Clip> {
        FfprobeInspector.inspect(&media_root.join(source).to_string_lossy())
    };
    let inspector: &dyn MediaInspector = if args.probe {
        &probe
    } else {
        &manifest.media
    };

    let result = montage::compose_sources(
        &manifest.sources,
        manifest.overlay.as_deref(),
        mode,
        opts,
        inspector,
    )?;

    let json = result.to_json_pretty()?;
    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, format!("{json}\n"))
                .with_context(|| format!("write result '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let mut table = BTreeMap::new();
    for path in &args.files {
        let source = path.to_string_lossy();
        let clip = FfprobeInspector
            .inspect(&source)
            .with_context(|| format!("probe '{source}'"))?;
        let preferred_transform =
            (clip.preferred_transform != Affine::IDENTITY).then_some(clip.preferred_transform);
        table.insert(
            source.into_owned(),
            ClipMetadata {
                duration: clip.duration,
                natural_size: clip.natural_size,
                has_audio: clip.has_audio,
                preferred_transform,
                rotation: None,
            },
        );
    }
    write_json(std::io::stdout().lock(), &table)
}

fn write_json<W: std::io::Write, T: serde::Serialize>(mut w: W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut w, value).context("serialize JSON")?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}
