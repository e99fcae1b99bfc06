pub use crate::error::Error;

pub use anstream::{eprint, eprintln, println};
pub use color_eyre::eyre::{eyre, OptionExt, Result};
pub use std::format as f;

/// Width of the `=` rules framing summaries and results.
pub const RULE_WIDTH: usize = 80;

/// Borderless table for the upload summaries.
pub fn new_table() -> prettytable::Table {
    let mut table = prettytable::Table::new();

    let format = prettytable::format::FormatBuilder::new()
        .column_separator(' ')
        .padding(1, 1)
        .build();

    table.set_format(format);

    table
}
