mod assets;
mod codegen;
mod config;

use std::io::Write as _;

use anyhow::{Context, Result};

pub use assets::{
    AssetFile, DirectoryAccessError, IdentifierProblem, enumerate_files, identifier,
    identifier_problems,
};
pub use codegen::{TableStyle, render, render_declarations, render_table};
pub use config::{CONFIG_FILE, Options};

/// Scans the configured root and renders the manifest. Nothing is produced
/// if enumeration fails.
pub fn manifest(opts: &Options) -> Result<String> {
    let root = opts.root_dir();
    let files = enumerate_files(&root, opts.sort())?;
    log::info!("{} ROMs in {}", files.len(), root.display());
    Ok(render(opts, &files))
}

/// Writes the manifest to stdout.
pub fn print(opts: &Options) -> Result<()> {
    let code = manifest(opts)?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(code.as_bytes())
        .and_then(|()| stdout.flush())
        .context("could not write manifest")
}

/// Writes the manifest into the output directory, for use from `build.rs`.
pub fn generate(opts: Options) -> Result<()> {
    let root = opts.root_dir();
    opts.watch(&root);
    let files = enumerate_files(&root, opts.sort())?;
    codegen::write(&opts, &files)?;
    log::info!("wrote {} ROMs to {}", files.len(), opts.output_path().display());
    Ok(())
}
