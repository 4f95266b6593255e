#![no_std]

/// Identifier and contents of every embedded ROM, in manifest order.
pub type RomTable = [(&'static str, &'static [u8])];

pub fn find(table: &RomTable, identifier: &str) -> Option<&'static [u8]> {
    table
        .iter()
        .find(|(name, _)| *name == identifier)
        .map(|(_, data)| *data)
}

/// Index after `current`, wrapping to the start.
pub fn next_index(len: usize, current: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

/// Index before `current`, wrapping to the end.
pub fn prev_index(len: usize, current: usize) -> usize {
    match (len, current) {
        (0, _) => 0,
        (_, 0) => len - 1,
        _ => (current - 1).min(len - 1),
    }
}

#[macro_export]
#[cfg(windows)]
macro_rules! path_sep {
    () => {
        "\\"
    };
}
#[macro_export]
#[cfg(not(windows))]
macro_rules! path_sep {
    () => {
        "/"
    };
}

#[macro_export]
macro_rules! out_path {
    ($filename:expr) => {
        concat!(env!("OUT_DIR"), $crate::path_sep!(), $filename)
    };
}

/// Pulls in the manifest a build script wrote with `rom_manifest_build::generate`.
#[macro_export]
macro_rules! include_roms {
    () => {
        $crate::include_roms!("roms.rs");
    };
    ($filename:expr) => {
        include!($crate::out_path!($filename));
    };
}
