use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use stagehand::{
    Director, DirectorOpts, Dot, PlaybackSummary, RecordingRenderer, SceneNode, Sequencer,
    SteppedTimer, Vec2,
};
use tracing_subscriber::EnvFilter;

/// Play a scripted scene headlessly and print what was drawn.
#[derive(Parser, Debug)]
#[command(name = "stagehand", version)]
struct Cli {
    /// Director options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured time scale.
    #[arg(long)]
    time_scale: Option<f64>,

    /// Frames per second of the simulated clock.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Stop after this many presented frames.
    #[arg(long)]
    frames: Option<usize>,

    /// Number of dots in the demo scene.
    #[arg(long, default_value_t = 5)]
    dots: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = load_opts(&cli)?;
    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        anyhow::bail!("--fps must be finite and > 0, got {}", cli.fps);
    }

    let root = SceneNode::new();
    let target = root.add_empty("target").context("create target")?;
    target.set_translation(Vec2::new(0.0, 100.0));
    let row = root.add_empty("row").context("create row")?;
    let mut dots = Vec::with_capacity(cli.dots);
    for i in 0..cli.dots {
        let dot = row
            .add_primitive(format!("dot{i}"), Dot::new(4.0 + i as f64))
            .with_context(|| format!("create dot{i}"))?;
        dot.set_translation(Vec2::new(-50.0 + 25.0 * i as f64, -40.0 * (i % 2) as f64));
        dots.push(dot);
    }

    let mut renderer = RecordingRenderer::new().counting_only();
    if let Some(max) = cli.frames {
        renderer = renderer.with_max_frames(max);
    }
    let mut director = Director::new(root, renderer, opts)?;
    let mut timer = SteppedTimer::from_fps(cli.fps);

    let built = director.build(&row)?;
    report("build", built, director.play(&mut timer)?);

    let stagger = Sequencer::filling_interval(cli.dots.max(2), 1.0, 0.5)?;
    director
        .arrange(&target, &dots, stagger, stagger)
        .context("schedule arrange")?;
    report("arrange", dots.len(), director.play(&mut timer)?);

    let unbuilt = director.unbuild(&row)?;
    report("unbuild", unbuilt, director.play(&mut timer)?);

    eprintln!("{}", director.root().dump_bounds());
    println!("presented {} frames", director.renderer().frame_count());
    Ok(())
}

fn load_opts(cli: &Cli) -> anyhow::Result<DirectorOpts> {
    let mut opts = match &cli.config {
        Some(path) => DirectorOpts::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => DirectorOpts::default(),
    };
    if let Some(scale) = cli.time_scale {
        opts.time_scale = scale;
    }
    opts.validate().context("validate options")?;
    Ok(opts)
}

fn report(phase: &str, count: usize, summary: PlaybackSummary) {
    println!(
        "{phase}: {count} nodes, {} frames, ended at t={:.3} ({:?})",
        summary.frames, summary.last_time, summary.end
    );
}
