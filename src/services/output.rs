use crate::domain::models::JsonOut;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

/// Like `print_out`, but each record may expand to several text lines.
pub fn print_nested<T: Serialize>(
    json: bool,
    data: &[T],
    rows: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            for line in rows(d) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}
