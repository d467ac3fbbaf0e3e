use crate::ir::{DataEntry, Dataset};
use anyhow::{Result, anyhow};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetFile {
    title: Option<String>,
    #[serde(default)]
    show_data: bool,
    data: Vec<DataEntry>,
}

/// Parse a dataset given either as JSON or as Mermaid-style pie text.
///
/// JSON input is a bare array of `{label, value}` records or an object with a
/// `data` array. Text input looks like:
///
/// ```text
/// pie showData title Pets
///     "Dogs" : 386
///     "Cats" : 85.5
/// ```
pub fn parse_dataset(input: &str) -> Result<Dataset> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        let entries: Vec<DataEntry> = serde_json::from_str(trimmed)?;
        return Ok(Dataset::from_entries(entries));
    }
    if trimmed.starts_with('{') {
        let file: DatasetFile = serde_json::from_str(trimmed)?;
        return Ok(Dataset {
            title: file.title,
            show_data: file.show_data,
            entries: file.data,
        });
    }
    parse_pie_text(input)
}

fn parse_pie_text(input: &str) -> Result<Dataset> {
    let mut dataset = Dataset::new();
    for (line_no, raw_line) in input.lines().enumerate() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_ascii_lowercase();
        if lower.starts_with("pie") {
            if lower.contains("showdata") {
                dataset.show_data = true;
            }
            // "pie title My Title"
            if let Some(title_pos) = lower.find("title") {
                let title = line.get(title_pos + 5..).unwrap_or("").trim();
                if !title.is_empty() {
                    dataset.title = Some(title.to_string());
                }
            }
            continue;
        }
        if lower.starts_with("showdata") {
            dataset.show_data = true;
            continue;
        }
        if lower.starts_with("title") {
            let title = line.get(5..).unwrap_or("").trim();
            if !title.is_empty() {
                dataset.title = Some(title.to_string());
            }
            continue;
        }
        let (label, value) = parse_slice_line(line)
            .ok_or_else(|| anyhow!("line {}: expected `\"label\" : value`, got {line:?}", line_no + 1))?;
        dataset.push(label, value);
    }
    Ok(dataset)
}

fn strip_comment(line: &str) -> &str {
    match line.find("%%") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_slice_line(line: &str) -> Option<(String, f64)> {
    let (label_part, value_part) = line.rsplit_once(':')?;
    let label = strip_quotes(label_part.trim());
    if label.is_empty() {
        return None;
    }
    let value = value_part.trim().parse::<f64>().ok()?;
    Some((label, value))
}

fn strip_quotes(raw: &str) -> String {
    let stripped = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw);
    stripped.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pie_text() {
        let input = r#"
%% pets owned by volunteers
pie showData title Key elements
    "Calcium" : 42.96
    "Potassium" : 50.05  %% rounded
    "Magnesium: trace" : 10
"#;
        let dataset = parse_dataset(input).unwrap();
        assert!(dataset.show_data);
        assert_eq!(dataset.title.as_deref(), Some("Key elements"));
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.entries[0], DataEntry::new("Calcium", 42.96));
        assert_eq!(dataset.entries[2], DataEntry::new("Magnesium: trace", 10.0));
    }

    #[test]
    fn parses_json_array_and_object() {
        let array = parse_dataset(r#"[{"label": "a", "value": 1}, {"label": "b", "value": 2.5}]"#).unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array.total(), 3.5);

        let object =
            parse_dataset(r#"{"title": "T", "showData": true, "data": [{"label": "x", "value": 4}]}"#)
                .unwrap();
        assert_eq!(object.title.as_deref(), Some("T"));
        assert!(object.show_data);
        assert_eq!(object.entries, vec![DataEntry::new("x", 4.0)]);
    }

    #[test]
    fn reports_bad_lines() {
        let err = parse_dataset("pie\n\"a\" : 1\nnot a slice\n").unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }
}
