mod roms {
    rom_table::include_roms!();
}

use rom_table::RomTable;

const SELECTED: &str = "PONG";

fn main() {
    let table: &RomTable = roms::ROMS;
    for (index, (name, data)) in table.iter().enumerate() {
        println!("{index:02}: {name} ({} bytes)", data.len());
    }

    match rom_table::find(table, SELECTED) {
        Some(data) => println!("{SELECTED} starts with {:02x?}", &data[..data.len().min(4)]),
        None => println!("{SELECTED} is not embedded"),
    }
    let next = rom_table::next_index(table.len(), 0);
    if let Some((name, _)) = table.get(next) {
        println!("next after 00: {name}");
    }
}
