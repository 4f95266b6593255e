use std::path::Path;

use anyhow::Result;
use rom_manifest_build::{CONFIG_FILE, Options};

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let opts = Options::from_config_or_default(Path::new(CONFIG_FILE))?;
    rom_manifest_build::print(&opts)
}
