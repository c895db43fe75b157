use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn raw_is_single_line() {
        let value = json!({"id": 1, "title": "a"});
        assert_eq!(render(&value, OutputFormat::Raw).unwrap(), r#"{"id":1,"title":"a"}"#);
    }

    #[test]
    fn json_is_pretty() {
        let value = json!({"id": 1});
        assert_eq!(render(&value, OutputFormat::Json).unwrap(), "{\n  \"id\": 1\n}");
    }
}
