use tabletop_scene::{
    FrameRecorder, Scene, SceneConfig,
    backend::Draw,
    gpu::{GpuContext, GpuTextures},
};

fn main() -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        eprintln!("Logger already initialised: {e}");
    }

    let config = SceneConfig::from_env();
    log::info!("loading textures from {}", config.texture_dir.display());

    let ctx = futures::executor::block_on(GpuContext::headless())?;
    let mut textures = GpuTextures::new(&ctx);
    let mut recorder = FrameRecorder::new();

    let mut scene = Scene::tabletop(config);
    scene.prepare(&mut textures, &mut recorder);

    recorder.begin_frame();
    scene.render_frame(&mut recorder);

    let mut draws = 0;
    for (i, (draw, object)) in recorder.draws().enumerate() {
        let what = match draw {
            Draw::Mesh(shape) => format!("{shape:?}"),
            Draw::BoxSide(side) => format!("Box/{side:?}"),
        };
        let surface = if object.uses_texture() {
            format!("texture unit {}", object.texture_unit)
        } else {
            format!("colour {:?}", object.color)
        };
        log::info!("{i:>2} {what:<16} {surface}, shininess {}", object.shininess);
        draws += 1;
    }
    println!(
        "{} textures on {}, {} materials, {} draw calls",
        scene.textures().len(),
        ctx.adapter_info.name,
        scene.materials().len(),
        draws
    );

    scene.release(&mut textures);
    Ok(())
}
