use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Places the workspace `config.toml` next to the compiled binary so the
/// server picks it up without a working-directory convention.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return;
    };

    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    if !source.exists() {
        println!("cargo:warning=config.toml not found at {:?}, the embedded default will be used", source);
        return;
    }

    let dest = target_dir.join("config.toml");
    match fs::copy(&source, &dest) {
        Ok(_) => println!("cargo:warning=Copied config.toml to {:?}", dest),
        Err(e) => println!("cargo:warning=Failed to copy config.toml: {}", e),
    }
}

/// OUT_DIR is `target/<profile>/build/<pkg>-<hash>/out`; walk up to `target/<profile>`
fn profile_dir() -> Option<PathBuf> {
    let out_dir = env::var("OUT_DIR").ok()?;
    let profile = env::var("PROFILE").ok()?;
    Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}
