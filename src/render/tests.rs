use super::*;
use std::path::PathBuf;

fn plain() -> TableRenderer {
    TableRenderer {
        max_cell_width: DEFAULT_MAX_CELL_WIDTH,
        color: false,
    }
}

fn batch(rows: Vec<Vec<Option<&str>>>) -> MatchBatch {
    MatchBatch {
        file_path: PathBuf::from("bases/leak1.csv"),
        dataset: "leak1.csv".to_string(),
        column: "username".to_string(),
        headers: vec!["username".to_string(), "email".to_string()],
        rows: rows
            .into_iter()
            .map(|row| row.into_iter().map(|c| c.map(str::to_string)).collect())
            .collect(),
    }
}

#[test]
fn test_render_plain_table() {
    let rendered = plain().render(&batch(vec![
        vec![Some("bob123"), Some("bob@x.com")],
        vec![Some("bobby"), None],
    ]));

    let expected = "
Results from leak1.csv (column: username)
╒══════════╤═══════════╕
│ username │   email   │
╞══════════╪═══════════╡
│  bob123  │ bob@x.com │
├──────────┼───────────┤
│  bobby   │    N/A    │
╘══════════╧═══════════╛
";
    assert_eq!(rendered, expected);
}

#[test]
fn test_missing_value_shows_marker() {
    let renderer = plain();
    assert_eq!(renderer.display_value(None), "N/A");
    assert_eq!(renderer.display_value(Some("x")), "x");
}

#[test]
fn test_truncation_is_display_only() {
    let long = "a".repeat(45);
    let b = batch(vec![vec![Some(long.as_str()), None]]);

    let rendered = plain().render(&b);
    assert!(rendered.contains(&"a".repeat(30)));
    assert!(!rendered.contains(&"a".repeat(31)));
    // The batch itself still holds the full value
    assert_eq!(b.rows[0][0].as_deref(), Some(long.as_str()));
}

#[test]
fn test_custom_width() {
    let renderer = TableRenderer {
        max_cell_width: 4,
        color: false,
    };
    assert_eq!(renderer.display_value(Some("abcdefgh")), "abcd");
}

#[test]
fn test_color_escapes_and_newlines_are_cleaned() {
    let renderer = plain();
    assert_eq!(
        renderer.display_value(Some("\x1b[37mline one\nline two\x1b[0m")),
        "line one line two"
    );
}

#[test]
fn test_colored_output_contains_escapes() {
    colored::control::set_override(true);
    let renderer = TableRenderer::default();
    let rendered = renderer.render(&batch(vec![vec![Some("bob"), None]]));
    colored::control::unset_override();

    assert!(rendered.contains("\x1b["));
    assert!(rendered.contains("N/A"));
}

#[test]
fn test_truncate_chars_respects_boundaries() {
    assert_eq!(truncate_chars("", 5), "");
    assert_eq!(truncate_chars("abc", 0), "");
    assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
}

#[test]
fn test_warning_text() {
    let renderer = plain();
    let event = SearchEvent::DatasetFailed {
        file_path: PathBuf::from("bases/bad.csv"),
        error: "bad.csv has no header row".to_string(),
    };
    assert_eq!(
        renderer.warning(&event).as_deref(),
        Some("Error processing file bases/bad.csv: bad.csv has no header row")
    );
    assert!(renderer.warning(&SearchEvent::Matches(batch(vec![]))).is_none());
}

#[test]
fn test_console_sink_streams_tables_and_warnings() -> anyhow::Result<()> {
    let mut sink = ConsoleSink::new(Vec::new(), plain());
    sink.on_event(&SearchEvent::Matches(batch(vec![vec![Some("bob"), None]])));
    sink.on_event(&SearchEvent::ColumnFailed {
        file_path: PathBuf::from("bases/a.csv"),
        column: "email".to_string(),
        error: "boom".to_string(),
    });

    let out = String::from_utf8(sink.finish()?)?;
    assert!(out.contains("Results from leak1.csv (column: username)"));
    assert!(out.contains("Error in search query for bases/a.csv (column: email): boom"));
    Ok(())
}

#[test]
fn test_json_sink_writes_one_line_per_event() -> anyhow::Result<()> {
    let mut sink = JsonSink::new(Vec::new());
    sink.on_event(&SearchEvent::Matches(batch(vec![vec![Some("bob"), None]])));
    sink.on_event(&SearchEvent::DatasetFailed {
        file_path: PathBuf::from("bases/bad.csv"),
        error: "boom".to_string(),
    });

    let out = String::from_utf8(sink.finish()?)?;
    let lines: Vec<serde_json::Value> = out
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], "matches");
    assert_eq!(lines[0]["rows"][0][0], "bob");
    assert_eq!(lines[1]["event"], "dataset_failed");
    Ok(())
}

#[test]
fn test_json_sink_closes_with_summary() -> anyhow::Result<()> {
    let sink = JsonSink::new(Vec::new());
    let out = String::from_utf8(sink.finish_with_summary(&SearchSummary::default())?)?;

    let lines: Vec<serde_json::Value> = out
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["event"], "summary");
    assert_eq!(lines[0]["found"], false);
    assert_eq!(lines[0]["matched_rows"], 0);

    let mut sink = JsonSink::new(Vec::new());
    sink.on_event(&SearchEvent::Matches(batch(vec![vec![Some("bob"), None]])));
    let summary = SearchSummary {
        datasets_found: 1,
        datasets_searched: 1,
        columns_searched: 1,
        batches: 1,
        matched_rows: 1,
        ..SearchSummary::default()
    };
    let out = String::from_utf8(sink.finish_with_summary(&summary)?)?;
    let last: serde_json::Value = serde_json::from_str(out.lines().last().unwrap_or_default())?;
    assert_eq!(out.lines().count(), 2);
    assert_eq!(last["event"], "summary");
    assert_eq!(last["found"], true);
    assert_eq!(last["datasets_searched"], 1);
    Ok(())
}

#[test]
fn test_wide_characters_keep_borders_aligned() {
    let rows = vec![
        vec![Some("山田太郎".to_string()), Some("bob".to_string())],
        vec![Some("x".to_string()), None],
    ];
    let headers = ["username".to_string(), "email".to_string()];
    let rendered = plain().render_table("title", &headers, &rows);

    let widths: Vec<usize> = rendered
        .lines()
        .skip(2)
        .map(display_width)
        .collect();
    assert_eq!(widths.len(), 7);
    assert!(widths.iter().all(|w| *w == widths[0]), "{rendered}");
    assert!(rendered.contains("│ 山田太郎 │"));
}
