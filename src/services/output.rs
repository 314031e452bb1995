use crate::domain::models::JsonOut;
use serde::Serialize;

fn emit_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok: true, data })?
    );
    Ok(())
}

/// Scan-style listings: one tab-separated row per item in text mode,
/// a `JsonOut` array under `--json`.
pub fn print_list<T: Serialize>(
    json: bool,
    items: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        return emit_json(items);
    }
    for item in items {
        println!("{}", row(item));
    }
    Ok(())
}

/// Single-value answers (detect, validate): one line of text or one
/// `JsonOut` object.
pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        return emit_json(data);
    }
    println!("{}", row(&data));
    Ok(())
}

/// Multi-line reports for the flows that mint credentials or write
/// files (share, import, convert). The closure renders the human text;
/// `--json` emits the report struct itself.
pub fn print_report<T: Serialize>(
    json: bool,
    data: T,
    lines: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    if json {
        return emit_json(data);
    }
    for line in lines(&data) {
        println!("{}", line);
    }
    Ok(())
}
