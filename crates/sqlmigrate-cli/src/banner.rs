use std::path::Path;

use sqlmigrate_db::Statement;

const WIDTH: usize = 70;
const LABEL_W: usize = 12;

/// Render the `--dry-run` listing: a boxed header followed by every
/// statement, numbered, in the order a real run would apply them.
pub fn render_plan(source: &str, database: &Path, statements: &[Statement]) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let title = format!("sqlmigrate v{version} (dry run)");
    let title = fit(&title, WIDTH - 7);
    let title_dashes = WIDTH - 2 - title.chars().count() - 5; // 2 for ╭╮, 5 for "─── " + " "
    let inner = WIDTH - 4; // "│ " + " │"

    let label_w = LABEL_W;
    let value_w = inner - label_w;

    let row = |label: &str, value: &str| {
        format!("│ {label:<label_w$}{:<value_w$} │", fit(value, value_w))
    };

    let count = statements.len();
    let mut out = Vec::new();
    out.push(format!("╭─── {title} {}╮", "─".repeat(title_dashes)));
    out.push(row("Source", source));
    out.push(row("Database", &database.display().to_string()));
    out.push(row(
        "Statements",
        &format!("{count} (one transaction, nothing applied)"),
    ));
    out.push(format!("╰{}╯", "─".repeat(WIDTH - 2)));

    for (i, statement) in statements.iter().enumerate() {
        out.push(String::new());
        out.push(format!("-- [{}/{count}]", i + 1));
        if statement.is_blank() {
            out.push("-- (blank)".to_string());
        } else {
            out.push(statement.to_string());
        }
    }

    out.join("\n")
}

/// Shorten `text` to `width` characters, keeping its tail (the file name end
/// of a path) behind a leading ellipsis.
fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    let tail: String = text.chars().skip(len - width + 1).collect();
    format!("…{tail}")
}

pub fn print_plan(source: &str, database: &Path, statements: &[Statement]) {
    println!("{}", render_plan(source, database, statements));
}
