use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use folio::{
    ContainerMetrics, DEFAULT_RECENT_COUNT, FieldConfig, FieldRenderer, PixelField, Point, PostQuery,
    PostStore, SimHost, Surface,
};

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    /// Log level when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single pixel-field frame as a PNG.
    Frame(FrameArgs),
    /// Run the pixel field on a simulated host and write every presented frame.
    Frames(FramesArgs),
    /// Query the post index.
    Posts(PostsArgs),
}

#[derive(Parser, Debug)]
struct FieldArgs {
    /// Container width in layout units.
    #[arg(long)]
    width: f64,

    /// Container height in layout units.
    #[arg(long)]
    height: f64,

    /// Reported device pixel ratio (clamped by the config).
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Pointer position in layout units, `X,Y`.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Point>,

    /// Field config JSON; defaults apply to missing keys.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    field: FieldArgs,

    /// Milliseconds since the field started.
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    field: FieldArgs,

    /// Simulated run time in milliseconds.
    #[arg(long, default_value_t = 1000.0)]
    duration_ms: f64,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct PostsArgs {
    /// Read `*.md` posts from this directory instead of the bundled set.
    #[arg(long)]
    content_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: PostsCommand,
}

#[derive(Subcommand, Debug)]
enum PostsCommand {
    /// List posts, newest first.
    List {
        /// Only the N newest posts (6 when N is omitted).
        #[arg(long, num_args = 0..=1)]
        recent: Option<Option<usize>>,
        /// Exact category filter.
        #[arg(long)]
        category: Option<String>,
    },
    /// Print one post by slug.
    Show { slug: String },
    /// Case-insensitive full-text search.
    Search { query: String },
    /// List distinct categories.
    Categories,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level)?;
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Posts(args) => cmd_posts(args),
    }
}

fn init_tracing(level: tracing::Level) -> anyhow::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::from_level(level).into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().with_target(true).with_writer(std::io::stderr))
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(Point::new(x, y))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<FieldConfig> {
    match path {
        Some(p) => FieldConfig::from_json_path(p).with_context(|| format!("load config '{}'", p.display())),
        None => Ok(FieldConfig::default()),
    }
}

fn write_png(path: &Path, surface: &Surface) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let canvas = surface.canvas();
    image::save_buffer_with_format(
        path,
        &surface.to_straight_rgba(),
        canvas.width,
        canvas.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.field.config.as_deref())?;
    let mut renderer = FieldRenderer::new(cfg, 0.0)?;
    renderer.resize(ContainerMetrics::new(
        args.field.width,
        args.field.height,
        args.field.scale,
    ))?;
    renderer.set_pointer(args.field.pointer);
    renderer.render(args.time_ms);

    let surface = renderer
        .surface()
        .context("container has zero size; nothing to draw")?;
    write_png(&args.out, surface)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.field.config.as_deref())?;
    let metrics = ContainerMetrics::new(args.field.width, args.field.height, args.field.scale);
    let host = SimHost::new(metrics).recording();

    let mut field = PixelField::mount(host.clone(), cfg)?;
    if let Some(p) = args.field.pointer {
        host.pointer_move(&mut field, p)?;
    }
    host.advance(&mut field, args.duration_ms)?;
    field.unmount();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let frames = host.take_recorded();
    for (i, (_, surface)) in frames.iter().enumerate() {
        write_png(&args.out_dir.join(format!("frame_{i:05}.png")), surface)?;
    }

    eprintln!("wrote {} frames to {}", frames.len(), args.out_dir.display());
    Ok(())
}

fn cmd_posts(args: PostsArgs) -> anyhow::Result<()> {
    let store = match &args.content_dir {
        Some(dir) => PostStore::load_dir(dir)?,
        None => PostStore::bundled().context("load bundled posts")?,
    };

    let json = match args.cmd {
        PostsCommand::List { recent, category } => {
            let mut posts = store.query(&PostQuery {
                category,
                search: None,
            });
            if let Some(n) = recent {
                posts.truncate(n.unwrap_or(DEFAULT_RECENT_COUNT));
            }
            serde_json::to_string_pretty(&posts)?
        }
        PostsCommand::Show { slug } => {
            let post = store
                .post_by_slug(&slug)
                .with_context(|| format!("no post with slug '{slug}'"))?;
            serde_json::to_string_pretty(&post)?
        }
        PostsCommand::Search { query } => serde_json::to_string_pretty(&store.search_posts(&query))?,
        PostsCommand::Categories => serde_json::to_string_pretty(&store.categories())?,
    };
    println!("{json}");
    Ok(())
}
