//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "Token · command (context)"
/// Plain mode: "token command"
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("Token", styles::bold(), ctx.color);
            match context {
                Some(c) => format!("{} \u{00B7} {} ({})", title, command, c),
                None => format!("{} \u{00B7} {}", title, command),
            }
        }
        OutputMode::Plain => format!("token {}", command),
        OutputMode::Json => String::new(),
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored_badge = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: badge plus indented key-value pairs
/// Plain mode: `status=` line plus key=value lines
pub fn receipt(ctx: &UiContext, kind: Badge, title: &str, items: &[(&str, String)]) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, kind, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        let status = if kind == Badge::Fail { "failed" } else { "ok" };
        lines.push(format!("status={}", status));
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }

    lines.join("\n")
}

/// Column definition for table rendering.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub numeric: bool,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            numeric: false,
        }
    }

    /// Right-aligned column for amounts.
    pub const fn numeric(header: &'static str) -> Self {
        Self {
            header,
            numeric: true,
        }
    }
}

/// Render a table.
///
/// Pretty mode: comfy-table with borders
/// Plain mode: space-separated values, no header
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = ComfyTable::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(comfy_table::presets::ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(ctx.width.min(u16::MAX as usize) as u16);

    let headers: Vec<Cell> = columns.iter().map(|c| Cell::new(c.header)).collect();
    table.set_header(headers);

    for row in rows {
        let cells: Vec<Cell> = row
            .iter()
            .zip(columns.iter())
            .map(|(value, column)| {
                let cell = Cell::new(value);
                if column.numeric {
                    cell.set_alignment(CellAlignment::Right)
                } else {
                    cell
                }
            })
            .collect();
        table.add_row(cells);
    }

    table.to_string()
}

/// Print a message to stdout unless the output is JSON.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() && !message.is_empty() {
        println!("{}", message);
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[✗] message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Fail, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h));
        }
    }

    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_ctx() -> UiContext {
        UiContext::plain()
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: true,
            width: 80,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_header_modes() {
        assert!(header(&pretty_ctx(), "run", Some("demo")).contains("Token"));
        assert_eq!(header(&plain_ctx(), "run", None), "token run");
    }

    #[test]
    fn test_badge_plain() {
        let b = badge(&plain_ctx(), Badge::Pass, "transfer");
        assert_eq!(b, "[PASS] transfer");
    }

    #[test]
    fn test_kv_modes() {
        assert_eq!(kv(&plain_ctx(), "Total Supply", "100"), "total_supply=100");
        let line = kv(&pretty_ctx(), "Total Supply", "100");
        assert!(line.contains("Total Supply:"));
    }

    #[test]
    fn test_receipt_plain_failed() {
        let items = [("steps", "3".to_string())];
        let out = receipt(&plain_ctx(), Badge::Fail, "Scenario failed", &items);
        assert_eq!(out, "status=failed\nsteps=3");
    }

    #[test]
    fn test_table_plain() {
        let columns = [Column::new("Account"), Column::numeric("Balance")];
        let rows = vec![vec!["owner".to_string(), "99950".to_string()]];
        assert_eq!(table(&plain_ctx(), &columns, &rows), "owner 99950");
    }

    #[test]
    fn test_table_pretty() {
        let columns = [Column::new("Account"), Column::numeric("Balance")];
        let rows = vec![
            vec!["owner".to_string(), "99950".to_string()],
            vec!["addr1".to_string(), "50".to_string()],
        ];
        let t = table(&pretty_ctx(), &columns, &rows);
        assert!(t.contains("Account"));
        assert!(t.contains("99950"));
        assert!(t.contains("addr1"));
    }

    #[test]
    fn test_error_message_plain() {
        let out = error_message(&plain_ctx(), "boom", Some("try again"));
        assert_eq!(out, "error=boom\nhint=try again");
    }
}
