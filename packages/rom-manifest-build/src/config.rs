use std::{
    env,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{AssetFile, TableStyle};

pub const CONFIG_FILE: &str = "roms.toml";

/// Where `include_bytes!` paths point.
#[derive(Clone, Debug, PartialEq, Eq)]
enum IncludeBase {
    /// `../` followed by the root, for generated code one level below the
    /// directory the root is relative to.
    BesideRoot,
    /// The full path under the root.
    Absolute,
    Prefix(String),
}

pub struct Options {
    input_dir: PathBuf,
    root: PathBuf,
    include_base: IncludeBase,
    binding_prefix: String,
    table_name: String,
    sort: bool,
    style: TableStyle,
    output_dir: PathBuf,
    output_file: String,
    emit_cargo: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            root: PathBuf::from("../games/"),
            include_base: IncludeBase::BesideRoot,
            binding_prefix: "ROM_".to_string(),
            table_name: "ROMS".to_string(),
            sort: true,
            style: TableStyle::Let,
            output_dir: PathBuf::from("."),
            output_file: "roms.rs".to_string(),
            emit_cargo: false,
        }
    }
}

impl Options {
    /// Settings for running from a build script: scan `games/` in the crate
    /// being built, embed by absolute path and write `roms.rs` to `OUT_DIR`.
    pub fn cargo_defaults() -> Result<Self> {
        let output_dir = env::var_os("OUT_DIR").context("OUT_DIR not defined")?;
        Ok(Self {
            input_dir: env::current_dir()?,
            root: PathBuf::from("games"),
            include_base: IncludeBase::Absolute,
            style: TableStyle::Static,
            output_dir: PathBuf::from(output_dir),
            emit_cargo: true,
            ..Self::default()
        })
    }

    /// Loads `path` if it exists and falls back to the defaults otherwise.
    pub fn from_config_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_config(path)
        } else {
            log::debug!("no {} found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_config(path: &Path) -> Result<Self> {
        let file = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&file)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        let input_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(raw.apply(Self {
            input_dir,
            ..Self::default()
        }))
    }

    pub fn with_root(self, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..self
        }
    }

    pub fn with_include_prefix(self, include_prefix: impl Into<String>) -> Self {
        Self {
            include_base: IncludeBase::Prefix(include_prefix.into()),
            ..self
        }
    }

    pub fn with_binding_prefix(self, binding_prefix: impl Into<String>) -> Self {
        Self {
            binding_prefix: binding_prefix.into(),
            ..self
        }
    }

    pub fn with_table_name(self, table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..self
        }
    }

    pub fn with_sort(self, sort: bool) -> Self {
        Self { sort, ..self }
    }

    pub fn with_style(self, style: TableStyle) -> Self {
        Self { style, ..self }
    }

    pub fn with_output(self, output_dir: impl Into<PathBuf>, output_file: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            output_file: output_file.into(),
            ..self
        }
    }

    pub fn root_dir(&self) -> PathBuf {
        self.input_dir.join(&self.root)
    }

    pub fn sort(&self) -> bool {
        self.sort
    }

    pub fn style(&self) -> TableStyle {
        self.style
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn binding(&self, file: &AssetFile) -> String {
        format!("{}{}", self.binding_prefix, file.identifier)
    }

    /// The path handed to `include_bytes!`.
    pub fn include_path(&self, file: &AssetFile) -> String {
        match &self.include_base {
            IncludeBase::Prefix(prefix) => format!("{prefix}{}", file.relative_path),
            IncludeBase::BesideRoot => Path::new("..")
                .join(&self.root)
                .join(&file.relative_path)
                .display()
                .to_string(),
            IncludeBase::Absolute => self
                .root_dir()
                .join(&file.relative_path)
                .display()
                .to_string(),
        }
    }

    pub(crate) fn watch(&self, path: &Path) {
        if self.emit_cargo {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }

    pub(crate) fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    pub(crate) fn output_file(&self) -> Result<BufWriter<File>> {
        let path = self.output_path();
        let file = File::create(&path)
            .with_context(|| format!("could not create {}", path.display()))?;
        Ok(BufWriter::new(file))
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    root: Option<PathBuf>,
    include_prefix: Option<String>,
    binding_prefix: Option<String>,
    table_name: Option<String>,
    sort: Option<bool>,
}

impl RawConfig {
    fn apply(self, opts: Options) -> Options {
        Options {
            root: self.root.unwrap_or(opts.root),
            include_base: self
                .include_prefix
                .map_or(opts.include_base, IncludeBase::Prefix),
            binding_prefix: self.binding_prefix.unwrap_or(opts.binding_prefix),
            table_name: self.table_name.unwrap_or(opts.table_name),
            sort: self.sort.unwrap_or(opts.sort),
            ..opts
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn file(name: &str) -> AssetFile {
        AssetFile::new(name.to_string())
    }

    #[test]
    fn defaults_match_games_layout() {
        let opts = Options::default();
        let rom = file("PONG");
        assert_eq!(opts.root_dir(), PathBuf::from("../games/"));
        assert_eq!(opts.binding(&rom), "ROM_PONG");
        assert_eq!(
            PathBuf::from(opts.include_path(&rom)),
            PathBuf::from("../../games/PONG")
        );
        assert_eq!(opts.table_name(), "ROMS");
        assert!(opts.sort());
    }

    #[test]
    fn include_path_without_prefix_uses_root() {
        let opts = Options {
            include_base: IncludeBase::Absolute,
            ..Options::default()
        }
        .with_root("/data/roms");
        assert_eq!(
            opts.include_path(&file("tetris.ch8")),
            PathBuf::from("/data/roms/tetris.ch8").display().to_string()
        );
    }

    #[test]
    fn config_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
root = "carts"
include_prefix = "../carts/"
binding_prefix = "CART_"
table_name = "CARTS"
sort = false
"#,
        )
        .unwrap();

        let opts = Options::from_config(&path).unwrap();
        let rom = file("MAZE");
        assert_eq!(opts.root_dir(), dir.path().join("carts"));
        assert_eq!(opts.binding(&rom), "CART_MAZE");
        assert_eq!(opts.include_path(&rom), "../carts/MAZE");
        assert_eq!(opts.table_name(), "CARTS");
        assert!(!opts.sort());
    }

    #[test]
    fn config_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "rom_dir = \"games\"\n").unwrap();
        assert!(Options::from_config(&path).is_err());
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let opts = Options::from_config_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(opts.root_dir(), PathBuf::from("../games/"));
    }

    #[test]
    fn config_root_moves_include_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "root = \"../carts/\"\n").unwrap();

        let opts = Options::from_config(&path).unwrap();
        assert_eq!(
            PathBuf::from(opts.include_path(&file("MAZE"))),
            PathBuf::from("../../carts/MAZE")
        );
    }

    #[test]
    fn root_without_trailing_slash_moves_include_paths() {
        let opts = Options::default().with_root("carts");
        assert_eq!(
            PathBuf::from(opts.include_path(&file("TANK"))),
            PathBuf::from("../carts/TANK")
        );
    }

    #[test]
    fn explicit_prefix_is_kept_when_root_changes() {
        let opts = Options::default()
            .with_include_prefix("../../games/")
            .with_root("elsewhere");
        assert_eq!(opts.include_path(&file("UFO")), "../../games/UFO");
    }
}
