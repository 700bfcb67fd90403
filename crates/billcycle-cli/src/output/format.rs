use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

impl<'a> Column<'a> {
    pub const fn left(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Left,
        }
    }

    pub const fn right(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Right,
        }
    }
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const MIN_COLUMN_WIDTH: usize = 6;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders an aligned table, or one labelled block per row when the
/// columns cannot fit in `max_width`. Cells are never truncated.
pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = natural_widths(columns, rows);
    let needed = INDENT
        + widths.iter().map(|width| cmp::max(*width, MIN_COLUMN_WIDTH)).sum::<usize>()
        + COLUMN_GAP * columns.len().saturating_sub(1);
    if needed > max_width {
        return render_blocks(columns, rows, block_label);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = Vec::with_capacity(rows.len() + 1);
    output.push(format_row(columns, &header, &widths));
    for row in rows {
        output.push(format_row(columns, row, &widths));
    }
    output
}

fn natural_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();

    for row in rows {
        for (slot, value) in widths.iter_mut().zip(row) {
            *slot = cmp::max(*slot, value.chars().count());
        }
    }

    widths
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, width))| {
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>();

    let line = format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)));
    line.trim_end().to_string()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            output.push(String::new());
        }
        output.push(format!("  {block_label} {}:", row_index + 1));
        for (column_index, label) in labels.iter().enumerate() {
            let value = row.get(column_index).map(String::as_str).unwrap_or("");
            output.push(format!("    {label:<label_width$}  {value}"));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::{Column, key_value_rows, render_table_or_blocks};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Total:", "300.00".to_string()),
                ("Installments:", "3".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Total:         300.00");
        assert_eq!(rows[1], "  Installments:  3");
    }

    #[test]
    fn table_right_aligns_amount_columns() {
        let columns = [Column::right("#"), Column::right("Amount"), Column::left("Due on")];
        let rows = vec![
            vec!["1".to_string(), "33.33".to_string(), "2026-03-20".to_string()],
            vec!["10".to_string(), "1033.34".to_string(), "2026-04-20".to_string()],
        ];

        let rendered = render_table_or_blocks(&columns, &rows, 80, "Installment");
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0], "   #   Amount  Due on");
        assert_eq!(rendered[1], "   1    33.33  2026-03-20");
        assert_eq!(rendered[2], "  10  1033.34  2026-04-20");
    }

    #[test]
    fn narrow_width_falls_back_to_blocks() {
        let columns = [
            Column::left("Card"),
            Column::left("Month"),
            Column::right("Total"),
        ];
        let rows = vec![
            vec!["visa".to_string(), "2026-03".to_string(), "210.00".to_string()],
            vec!["amex".to_string(), "2026-04".to_string(), "12.00".to_string()],
        ];

        let rendered = render_table_or_blocks(&columns, &rows, 20, "Invoice");
        assert_eq!(rendered[0], "  Invoice 1:");
        assert!(rendered[1].contains("Card:"));
        assert!(rendered[3].contains("210.00"));
        assert_eq!(rendered[4], "");
        assert_eq!(rendered[5], "  Invoice 2:");
    }
}
