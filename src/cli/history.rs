// src/cli/history.rs — Recent color requests

use crate::store::store::RecentRequestRow;
use crate::store::Store;

/// Print the most recent requests, newest first.
pub fn show_history(store: &Store, limit: u32, json: bool) -> anyhow::Result<()> {
    let rows = store.query_recent_requests(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No color requests yet.");
        return Ok(());
    }

    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

fn format_row(row: &RecentRequestRow) -> String {
    let req = &row.request;
    let date = req.created_at.get(..19).unwrap_or(&req.created_at);
    format!(
        "{}  {}  {:<15}  {}",
        date.replace('T', " "),
        req.hex_color,
        row.ip_address.as_deref().unwrap_or("-"),
        truncate(&req.input_text, 60)
    )
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::store::ColorRequestRow;

    #[test]
    fn test_format_row() {
        let row = RecentRequestRow {
            request: ColorRequestRow {
                id: 1,
                session_id: "s".into(),
                input_text: "a mountain brook".into(),
                hex_color: "#4c8c64".into(),
                raw_output: "#4c8c64".into(),
                imagery: None,
                created_at: "2026-10-18T09:15:00.123456Z".into(),
            },
            ip_address: None,
        };
        let line = format_row(&row);
        assert!(line.starts_with("2026-10-18 09:15:00  #4c8c64  -"));
        assert!(line.ends_with("a mountain brook"));
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }
}
