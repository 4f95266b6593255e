use anyhow::Result;
use rom_manifest_build::Options;

fn main() -> Result<()> {
    rom_manifest_build::generate(Options::cargo_defaults()?)
}
