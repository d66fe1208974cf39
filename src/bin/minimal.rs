use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use minimal::FrameSink as _;

#[derive(Parser, Debug)]
#[command(name = "minimal", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a spinning mesh (the unit cube unless `--obj` is given) to a PNG sequence.
    Cube(CubeArgs),
    /// Render animated noised generative lines to a PNG sequence.
    Lines(LinesArgs),
}

#[derive(Parser, Debug)]
struct CubeArgs {
    /// Number of frames to render.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out: PathBuf,

    /// OBJ model to render instead of the unit cube.
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Scene settings JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sweep-fill faces with flat shading instead of drawing edges.
    #[arg(long)]
    filled: bool,

    /// Distance from the camera to the model center.
    #[arg(long, default_value_t = 4.0)]
    distance: f64,
}

#[derive(Parser, Debug)]
struct LinesArgs {
    /// Number of frames to render.
    #[arg(long, default_value_t = 240)]
    frames: u64,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out: PathBuf,

    /// Scene settings JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of lines.
    #[arg(long, default_value_t = 12)]
    lines: usize,

    /// Noise seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Cube(args) => cmd_cube(args),
        Command::Lines(args) => cmd_lines(args),
    }
}

fn read_settings(path: Option<&PathBuf>) -> anyhow::Result<minimal::SceneSettings> {
    match path {
        Some(p) => minimal::SceneSettings::load(p)
            .with_context(|| format!("load settings '{}'", p.display())),
        None => Ok(minimal::SceneSettings::default()),
    }
}

fn cmd_cube(args: CubeArgs) -> anyhow::Result<()> {
    let settings = read_settings(args.config.as_ref())?;
    let mesh = match &args.obj {
        Some(p) => minimal::Mesh::load_obj(p)?,
        None => minimal::Mesh::unit_cube(),
    };
    let mode = if args.filled {
        minimal::RenderMode::Filled
    } else {
        minimal::RenderMode::Wireframe
    };

    let scene = minimal::MeshScene::new(mesh.with_mode(mode).centered(), settings.viewport())
        .with_spin(minimal::Axis::Y, 0.03)
        .with_spin(minimal::Axis::X, 0.017)
        .with_offset(minimal::Vec3::new(0.0, 0.0, args.distance))
        .with_camera(settings.camera)
        .with_light(args.filled.then_some(settings.light))
        .with_shading(settings.shading)
        .with_projection(settings.projection);

    let mut canvas = minimal::Canvas::from_settings(&settings)?;
    canvas.add(scene);

    let mut sink = minimal::PngSequenceSink::new(&args.out);
    canvas.render_range(&mut sink, args.frames)?;
    eprintln!(
        "wrote {} frames to {}",
        sink.written().len(),
        args.out.display()
    );
    Ok(())
}

fn cmd_lines(args: LinesArgs) -> anyhow::Result<()> {
    let settings = read_settings(args.config.as_ref())?;
    let (w, h) = (f64::from(settings.width), f64::from(settings.height));
    let field = minimal::SimplexNoise::new(args.seed);
    let target = minimal::Color::from_hex("#1f4e8c")?;

    let mut canvas = minimal::Canvas::from_settings(&settings)?;
    let count = args.lines.max(1);
    for i in 0..count {
        let y = h * (i as f64 + 1.0) / (count as f64 + 1.0);
        let mut line = minimal::GenLine::new((w * 0.1, y), (w * 0.9, y), 200)?
            .with_color(minimal::Color::from_hsl(i as f64 / count as f64, 0.6, 0.5), 1.0)
            .with_width(1.5);
        line.gradient(target, 4, (0.3, 1.0))?;
        line.repeat(minimal::RepeatStart::Random(args.seed.wrapping_add(i as u64)));
        canvas.add(line);
    }

    let mut sink = minimal::PngSequenceSink::new(&args.out);
    sink.begin(minimal::SinkConfig {
        width: canvas.width(),
        height: canvas.height(),
        fps: canvas.fps(),
    })?;
    for frame in 0..args.frames {
        let z = frame as f64 * 0.01;
        for i in 0..count {
            if let Some(minimal::Layer::Object(item)) = canvas.layer_mut(i)
                && let Some(line) = item.as_line_mut()
            {
                line.noise_with(&field, minimal::NoiseScale::uniform(0.5), z);
            }
        }
        let pixels = canvas.render_next()?;
        sink.push_frame(frame, &pixels)?;
    }
    sink.end()?;
    eprintln!(
        "wrote {} frames to {}",
        sink.written().len(),
        args.out.display()
    );
    Ok(())
}
