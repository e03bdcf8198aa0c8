use anyhow::*;
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use std::env;
use std::path::PathBuf;

// Texture images live in `assets/textures/<material>.png`. They are mirrored
// into OUT_DIR so packaging scripts for the web build find them next to the
// compiled artefacts.
fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=assets/textures");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    if !manifest_dir.join("assets").exists() {
        return Ok(());
    }

    let mut copy_options = CopyOptions::new();
    copy_options.overwrite = true;
    let paths_to_copy = vec![manifest_dir.join("assets")];
    copy_items(&paths_to_copy, env::var("OUT_DIR")?, &copy_options)?;

    Ok(())
}
