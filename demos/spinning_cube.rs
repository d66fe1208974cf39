use minimal::{
    Axis, Canvas, Color, FlatShading, Mesh, MeshScene, PngSequenceSink, RenderMode, SceneSettings,
    Vec3,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let settings = SceneSettings {
        width: 480,
        height: 480,
        fps: 30,
        background: Color::from_hex("#12141c")?,
        shading: FlatShading::default()
            .with_lit(Color::from_hex("#f2c14e")?)
            .with_unlit(Color::from_hex("#3a3f58")?),
        ..SceneSettings::default()
    };
    settings.validate()?;

    let cube = Mesh::unit_cube()
        .with_mode(RenderMode::Filled)
        .centered();
    let scene = MeshScene::new(cube, settings.viewport())
        .with_spin(Axis::Y, 0.04)
        .with_spin(Axis::Z, 0.015)
        .with_offset(Vec3::new(0.0, 0.0, 3.0))
        .with_light(Some(settings.light))
        .with_shading(settings.shading)
        .with_projection(settings.projection);

    let mut canvas = Canvas::from_settings(&settings)?;
    canvas.add(scene);

    let out_dir = std::path::Path::new("target").join("spinning_cube");
    let mut sink = PngSequenceSink::new(&out_dir);
    canvas.render_range(&mut sink, 90)?;

    eprintln!("wrote {} frames to {}", sink.written().len(), out_dir.display());
    Ok(())
}
