//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::model::{ItemRole, Orientation, TreeModel};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print a flat model as tab-separated rows under a bold header line.
pub fn table(model: &TreeModel) {
    let columns = model.index_count_columns(None);
    let headers: Vec<String> = (0..columns)
        .map(|c| {
            model
                .header_data(c, Orientation::Horizontal)
                .map(|v| v.to_string())
                .unwrap_or_default()
        })
        .collect();
    header(&headers.join("\t"));

    for row in 0..model.index_count_rows(None) {
        let cells: Vec<String> = (0..columns)
            .map(|column| {
                model
                    .index(row, column, None)
                    .and_then(|idx| model.data(&idx, ItemRole::Display))
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            })
            .collect();
        info(&cells.join("\t"));
    }
}

/// Print one matching cell with its text highlighted (yellow bold).
pub fn matched(path: &str, cell: &str) {
    println!("{} {}", path.dimmed(), cell.yellow().bold());
}
