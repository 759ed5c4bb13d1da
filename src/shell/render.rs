use num_format::{Locale, ToFormattedString};
use sft::client::fs::DirEntry;

/// One listing row: `dd/mm/yyyy hh:mm`, the size with thousands separators
/// (blank for directories), a `<DIR>` marker, then the name.
pub fn entry_line(entry: &DirEntry) -> String {
    let modified = entry.modified.map_or_else(
        || "--/--/---- --:--".to_owned(),
        |time| time.format("%d/%m/%Y %H:%M").to_string(),
    );
    let (size, marker) = if entry.is_dir {
        (String::new(), "<DIR>")
    } else {
        (entry.size.to_formatted_string(&Locale::en), "")
    };

    format!("{modified}{size:>15}{marker:>7} {}", entry.name)
}
