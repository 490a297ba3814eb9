use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use panframe::{
    EmbedConfig, EmbedKind, FetchFontProbe, FsFetcher, LoadEnv, LoadedContent, MountOutcome,
    MountPoint, Size, SurfaceState, escape_html, load_content, mount, new_instance_id,
};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "panframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load an SVG or image and print its natural bounds as JSON.
    Inspect(InspectArgs),
    /// Write a standalone HTML page embedding the file in a pan/zoom widget.
    Embed(EmbedArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input SVG or image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Also load the system fonts before measuring text.
    #[arg(long, default_value_t = false)]
    system_fonts: bool,
}

#[derive(Parser, Debug)]
struct EmbedArgs {
    /// Input SVG or image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output HTML path.
    #[arg(long)]
    out: PathBuf,

    /// Toolbar title (defaults to the configured title for the content kind).
    #[arg(long)]
    title: Option<String>,

    /// JSON file overriding the widget tunables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial canvas width in pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Initial canvas height in pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Embed(args) => cmd_embed(args),
    }
}

fn kind_for(path: &Path) -> EmbedKind {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => EmbedKind::Svg,
        _ => EmbedKind::Image,
    }
}

/// Split `path` into a `file://` directory URL and the file name relative to it.
fn locate(path: &Path) -> anyhow::Result<(Url, String)> {
    let abs = std::fs::canonicalize(path)
        .with_context(|| format!("resolve input '{}'", path.display()))?;
    let dir = abs
        .parent()
        .with_context(|| format!("'{}' has no parent directory", abs.display()))?;
    let base = Url::from_directory_path(dir)
        .map_err(|()| anyhow::anyhow!("'{}' is not an absolute directory", dir.display()))?;
    let name = abs
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("'{}' has no UTF-8 file name", abs.display()))?;
    Ok((base, name.to_string()))
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (base, name) = locate(&args.in_path)?;
    let env = LoadEnv::with_fetched_fonts(FsFetcher, base).with_system_fonts(args.system_fonts);
    let kind = kind_for(&args.in_path);
    let id = new_instance_id(kind);
    let content = pollster::block_on(load_content(&env, kind, &name, &id))?;

    let report = match &content {
        LoadedContent::Svg(svg) => serde_json::json!({
            "kind": "svg",
            "url": svg.url,
            "bounds": svg.bounds,
            "fonts_requested": svg.fonts_requested,
            "font_warnings": svg.font_warnings,
        }),
        LoadedContent::Image(img) => serde_json::json!({
            "kind": "image",
            "url": img.url,
            "natural": img.natural,
            "format": img.format,
            "mime": img.mime,
        }),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_embed(args: EmbedArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            EmbedConfig::from_json(&text)?
        }
        None => EmbedConfig::default(),
    };
    let (base, name) = locate(&args.in_path)?;
    let env: LoadEnv<FsFetcher, FetchFontProbe<FsFetcher>> =
        LoadEnv::with_fetched_fonts(FsFetcher, base).with_config(config);

    let kind = kind_for(&args.in_path);
    let mut point = MountPoint::new(kind).with_attribute(kind.path_attribute(), &name);
    if let Some(title) = &args.title {
        point = point.with_title(title);
    }
    let canvas = Size::new(args.width, args.height);
    let outcome = pollster::block_on(mount(&env, &mut point, canvas, SurfaceState::default()));
    let title = match outcome {
        MountOutcome::Mounted(widget) => widget.title().to_string(),
        MountOutcome::Failed(err) => return Err(err.into()),
        MountOutcome::AlreadyMounted => anyhow::bail!("mount point was already initialized"),
    };

    let page = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<div class=\"{}-root\">\n{}\n</div>\n</body>\n</html>\n",
        escape_html(&title),
        kind.type_prefix(),
        point.content
    );

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, page)
        .with_context(|| format!("write html '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
