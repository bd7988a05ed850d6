//! Plain-text rendering of a parsed table list, aligned for
//! fixed-width output.

use crate::ast::Table;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 3] = ["Column", "Type", "Constraints"];

/// Render tables as aligned text blocks, one per table, in parse
/// order. An empty list still renders a message.
pub fn render_tables(tables: &[Table]) -> String {
    if tables.is_empty() {
        return "No CREATE TABLE statements found.\n".to_string();
    }

    let mut out = String::new();
    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_table(&mut out, table);
    }
    out
}

fn render_table(out: &mut String, table: &Table) {
    out.push_str(&format!("Table: {}\n", table.name));

    let mut widths = [
        UnicodeWidthStr::width(HEADERS[0]),
        UnicodeWidthStr::width(HEADERS[1]),
        UnicodeWidthStr::width(HEADERS[2]),
    ];
    for col in &table.columns {
        widths[0] = widths[0].max(UnicodeWidthStr::width(col.name.as_str()));
        widths[1] = widths[1].max(UnicodeWidthStr::width(col.typ.as_str()));
        widths[2] = widths[2].max(UnicodeWidthStr::width(col.constraints.as_str()));
    }

    push_row(out, HEADERS, &widths);
    for col in &table.columns {
        push_row(
            out,
            [
                col.name.as_str(),
                col.typ.as_str(),
                col.constraints.as_str(),
            ],
            &widths,
        );
    }
}

fn push_row(out: &mut String, cells: [&str; 3], widths: &[usize; 3]) {
    out.push_str("  ");
    for (i, cell) in cells.iter().enumerate() {
        out.push_str(cell);
        if i + 1 < cells.len() {
            let pad = widths[i] - UnicodeWidthStr::width(*cell) + 2;
            out.push_str(&" ".repeat(pad));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::parse_ddl;

    #[test]
    fn test_empty_list_message() {
        let out = render_tables(&[]);
        assert!(!out.is_empty());
        assert!(out.contains("No CREATE TABLE"));
    }

    #[test]
    fn test_columns_aligned() {
        let tables = parse_ddl("CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(50));");
        let out = render_tables(&tables);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Table: t");
        // Header and rows share column offsets
        let type_offset = lines[1].find("Type").unwrap();
        assert_eq!(lines[2].find("INT").unwrap(), type_offset);
        assert_eq!(lines[3].find("VARCHAR(50)").unwrap(), type_offset);
        assert!(lines[3].ends_with("None"));
    }

    #[test]
    fn test_one_block_per_table() {
        let tables = parse_ddl("CREATE TABLE a (x INT); CREATE TABLE b (y INT);");
        let out = render_tables(&tables);

        assert!(out.contains("Table: a"));
        assert!(out.contains("Table: b"));
    }
}
