fn main() -> anyhow::Result<()> {
    castle_scene::run(castle_scene::RenderSettings::default())
}
