use std::io::IsTerminal;

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

impl TableOptions {
    /// Colour and width limits only when stdout is a terminal.
    pub fn detect() -> Self {
        if !std::io::stdout().is_terminal() {
            return Self {
                max_width: None,
                color: false,
            };
        }
        let max_width = std::env::var("COLUMNS")
            .ok()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|width| *width > 0);
        Self {
            max_width,
            color: std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

/// Render an aligned table. The last column absorbs any width cut.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    if let (Some(max_width), Some(last)) = (options.max_width, widths.len().checked_sub(1)) {
        let fixed = widths[..last].iter().sum::<usize>() + last * 2;
        let header_min = headers[last].chars().count();
        widths[last] = widths[last].min(max_width.saturating_sub(fixed).max(header_min));
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(header, *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push("-".repeat(header_line.trim_end().chars().count()));

    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let cell = truncate(value, *width);
                let padded = pad(&cell, *width, looks_numeric(&cell));
                if options.color {
                    colorize_status(&padded, &cell)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit())
}

/// Wrap status words in ANSI colour, keeping the padding outside the escape.
fn colorize_status(padded: &str, cell: &str) -> String {
    let code = match cell {
        "PASS" | "COMPLETE" => "32",
        "PARTIAL" => "33",
        "FAIL" | "MISSING" => "31",
        _ => return padded.to_string(),
    };
    padded.replacen(cell, &format!("\u{1b}[{code}m{cell}\u{1b}[0m"), 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{TableOptions, render_table};

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["tests/test_auth.py".into(), "FAIL".into(), "1".into()],
            vec!["tests/TC-UT-001_auth.py".into(), "PASS".into(), "0".into()],
        ]
    }

    #[test]
    fn columns_align_and_numbers_right_align() {
        let table = render_table(&["file", "status", "violations"], &rows(), PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("file "));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].ends_with("         1"));
        assert_eq!(lines[2].find("FAIL"), lines[3].find("PASS"));
    }

    #[test]
    fn last_column_is_cut_to_max_width() {
        let rows = vec![vec!["a".into(), "x".repeat(80)]];
        let table = render_table(
            &["id", "reason"],
            &rows,
            TableOptions {
                max_width: Some(20),
                color: false,
            },
        );
        let row = table.lines().nth(2).unwrap();
        assert!(row.chars().count() <= 20);
        assert!(row.ends_with('…'));
    }

    #[test]
    fn status_words_are_coloured_when_enabled() {
        let table = render_table(
            &["file", "status"],
            &rows(),
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(table.contains("\u{1b}[31mFAIL\u{1b}[0m"));
        assert!(table.contains("\u{1b}[32mPASS\u{1b}[0m"));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let rows = vec![vec!["only".to_string()]];
        let table = render_table(&["a", "b"], &rows, PLAIN);
        assert!(table.lines().nth(2).unwrap().ends_with('-'));
    }
}
