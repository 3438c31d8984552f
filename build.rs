//! Build script for discografy.
//!
//! Places `.env.example` next to the `.env` file the binary reads, so a fresh
//! install has a template to start from:
//! - Linux: `~/.local/share/discografy/.env.example`
//! - macOS: `~/Library/Application Support/discografy/.env.example`
//! - Windows: `%LOCALAPPDATA%/discografy/.env.example`
//!
//! A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    if !template.is_file() {
        println!("cargo:warning=.env.example not found at {}", template.display());
        return Ok(());
    }

    let mut target = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    target.push("discografy");
    fs::create_dir_all(&target)?;
    fs::copy(&template, target.join(".env.example"))?;

    Ok(())
}
