use std::io::Write as _;

use anyhow::Result;

use crate::{AssetFile, Options};

/// How the lookup table is declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableStyle {
    /// `let ROMS = [ ... ];`, for pasting into a function body.
    Let,
    /// `pub static ROMS: &[(&str, &[u8])] = &[ ... ];`, for `include!` at
    /// module level.
    Static,
}

pub fn render_declarations(opts: &Options, files: &[AssetFile]) -> String {
    let mut code = String::new();
    for file in files {
        let binding = opts.binding(file);
        let path = opts.include_path(file);
        match opts.style() {
            TableStyle::Let => code.push_str(&format!(
                "static {binding}: &'static [u8] = include_bytes!({path:?});\n"
            )),
            TableStyle::Static => {
                code.push_str("#[allow(dead_code)]\n");
                code.push_str(&format!(
                    "pub static {binding}: &[u8] = include_bytes!({path:?});\n"
                ));
            }
        }
    }
    code
}

pub fn render_table(opts: &Options, files: &[AssetFile]) -> String {
    let mut code = match opts.style() {
        TableStyle::Let => format!("let {} = [\n", opts.table_name()),
        TableStyle::Static => format!("pub static {}: &[(&str, &[u8])] = &[\n", opts.table_name()),
    };
    for file in files {
        code.push_str(&format!(
            "    ({:?}, {}),\n",
            file.identifier,
            opts.binding(file)
        ));
    }
    code.push_str("];\n");
    code
}

/// Declarations, a blank line, then the table.
pub fn render(opts: &Options, files: &[AssetFile]) -> String {
    let mut code = render_declarations(opts, files);
    code.push('\n');
    code.push_str(&render_table(opts, files));
    code
}

pub fn write(opts: &Options, files: &[AssetFile]) -> Result<()> {
    let code = render(opts, files);
    let mut file = opts.output_file()?;
    file.write_all(code.as_bytes())?;
    file.flush()?;
    Ok(())
}
