use minimal::{Color, CoordSystem, Frame, GenLine, NoiseScale, Point, Shape, SimplexNoise};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let (w, h) = (640.0, 640.0);
    let mut frame = Frame::new(640, 640, Color::from_hex("#fbf7ef")?)?;
    let field = SimplexNoise::new(7);

    let backdrop = Shape::circle((w / 2.0, h / 2.0), 220.0)
        .with_fill(Some(Color::from_hex("#e8dcc4")?), 0.6)
        .with_outline(Color::from_hex("#b89f72")?, 1.0, 1.0);
    frame.add(backdrop)?;

    // Polar rings: x is the radius, y the angle.
    for ring in 0..24 {
        let radius = 60.0 + f64::from(ring) * 7.0;
        let mut line = GenLine::new((radius, 0.0), (radius, std::f64::consts::TAU), 360)?
            .with_coords(CoordSystem::Polar {
                offset: Point::new(w / 2.0, h / 2.0),
            })
            .with_color(Color::from_hsl(0.55 + f64::from(ring) / 96.0, 0.5, 0.35), 0.8)
            .with_width(1.0);
        for step in 0..ring {
            line.noise_with(&field, NoiseScale { x: 1.5, y: 0.002 }, f64::from(step) * 0.05);
        }
        line.gradient(Color::from_hex("#c0392b")?, 6, (0.9, 0.2))?;
        frame.add(line)?;
    }

    let out_path = std::path::Path::new("target").join("noisy_lines.png");
    frame.to_png(&out_path)?;

    eprintln!("wrote {}", out_path.display());
    Ok(())
}
