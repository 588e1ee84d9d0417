//! End-to-end tests for leaf path extraction.
//!
//! Runs the full pipeline from XML text to rows using the catalog fixture.

use std::fs;
use std::path::{Path, PathBuf};

use leafpath::output::{render_csv, save_rows, OutputFormat};
use leafpath::{extract_from_file, extract_from_str, Config, LeafRow};
use pretty_assertions::assert_eq;
use serde_json::json;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn config(value: serde_json::Value) -> Config {
    Config::from_value(value).expect("valid config")
}

fn paths(rows: &[LeafRow]) -> Vec<&str> {
    rows.iter().map(|row| row.path.as_str()).collect()
}

#[test]
fn test_full_paths_with_defaults() {
    let rows = extract_from_str(&load_fixture("catalog.xml"), &Config::default()).unwrap();

    // Nine text leaves; <generated/> is empty
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0].text, "Spring catalog");
    assert_eq!(
        rows[0].path,
        r#"/d:catalog[1]/d:header[1]/d:title[d:title="Spring catalog"][1]"#
    );
    assert_eq!(
        rows[5].path,
        r#"/d:catalog[1]/d:items[1]/d:item[3]/d:name[d:name="Widget ""Pro"""][1]"#
    );
}

#[test]
fn test_json_config_file() {
    let config = Config::from_file(&fixture_path("catalog.json")).unwrap();
    let rows = extract_from_file(&fixture_path("catalog.xml"), &config).unwrap();

    assert_eq!(
        paths(&rows),
        vec![
            r#"/d:catalog[1]/d:items[1]/d:item[@id="7"][1]/d:name[d:name="Widget"][1]"#,
            r#"/d:catalog[1]/d:items[1]/d:item[@id="7"][1]/d:price[d:price="9.95"][1]"#,
            r#"/d:catalog[1]/d:items[1]/d:item[@id="8"][1]/d:name[d:name="Gadget"][1]"#,
            r#"/d:catalog[1]/d:items[1]/d:item[@id="8"][1]/d:price[d:price="19.50"][1]"#,
            r#"/d:catalog[1]/d:items[1]/d:item[@id="7"][2]/d:name[d:name="Widget ""Pro"""][1]"#,
            r#"/d:catalog[1]/d:items[1]/d:item[@id="7"][2]/d:price[d:price="29.00"][1]"#,
            r#"/d:catalog[1]/d:notes[1]/d:note[d:note="First"][1]"#,
            r#"/d:catalog[1]/d:notes[1]/d:note[d:note="Second"][2]"#,
        ]
    );
    // Row text stays raw
    assert_eq!(rows[4].text, r#"Widget "Pro""#);
}

#[test]
fn test_yaml_config_file_reroots_at_items() {
    let config = Config::from_file(&fixture_path("catalog.yaml")).unwrap();
    let rows = extract_from_file(&fixture_path("catalog.xml"), &config).unwrap();

    assert_eq!(rows.len(), 6);
    assert_eq!(
        rows[0].path,
        r#"//c:items[1]/c:item[@id="7"][c:name="Widget"][1]/c:name[c:name="Widget"][1]"#
    );
    assert_eq!(
        rows[5].path,
        r#"//c:items[1]/c:item[@id="7"][c:name="Widget ""Pro"""][2]/c:price[c:price="29.00"][1]"#
    );
}

#[test]
fn test_row_count_matches_leaf_count() {
    let xml = load_fixture("catalog.xml");
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let leaves = doc
        .descendants()
        .filter(|n| n.is_element() && !n.children().any(|c| c.is_element()))
        .filter(|n| {
            !n.children()
                .filter_map(|c| c.text())
                .collect::<String>()
                .trim()
                .is_empty()
        })
        .count();

    let rows = extract_from_str(&xml, &Config::default()).unwrap();
    assert_eq!(rows.len(), leaves);
}

#[test]
fn test_ignored_subtree_contributes_nothing() {
    let xml = load_fixture("catalog.xml");
    let all = extract_from_str(&xml, &Config::default()).unwrap();
    let filtered = extract_from_str(&xml, &config(json!({"ignoreLeafNodes": ["items"]}))).unwrap();

    assert_eq!(filtered.len(), all.len() - 6);
    assert!(filtered.iter().all(|row| !row.path.contains("d:items")));
}

fn with_strategy(options: &serde_json::Value, strategy: &str) -> Config {
    let mut options = options.clone();
    options["startStrategy"] = json!(strategy);
    config(options)
}

#[test]
fn test_truncate_against_reroot() {
    let xml = load_fixture("catalog.xml");
    let options = json!({"attributesToIncludeInPath": ["id"], "startAtTag": "items"});

    let rerooted = extract_from_str(&xml, &with_strategy(&options, "reroot")).unwrap();
    let truncated = extract_from_str(&xml, &with_strategy(&options, "truncate")).unwrap();

    // Truncation keeps leaves outside <items> with their full path; rerooting drops them
    let mut expected = vec![LeafRow::new(
        "Spring catalog",
        r#"/d:catalog[1]/d:header[1]/d:title[d:title="Spring catalog"][1]"#,
    )];
    expected.extend(rerooted.iter().cloned());
    expected.push(LeafRow::new(
        "First",
        r#"/d:catalog[1]/d:notes[1]/d:note[d:note="First"][1]"#,
    ));
    expected.push(LeafRow::new(
        "Second",
        r#"/d:catalog[1]/d:notes[1]/d:note[d:note="Second"][2]"#,
    ));

    assert_eq!(rerooted.len(), 6);
    assert_eq!(truncated, expected);
}

#[test]
fn test_start_tag_matching_several_elements() {
    let xml = "<r><B><p>1</p></B><B><p>2</p></B></r>";
    let options = json!({"startAtTag": "B", "includeLeafValuePredicate": false});

    // Rerooting walks the first match only
    let rerooted = extract_from_str(xml, &with_strategy(&options, "reroot")).unwrap();
    assert_eq!(rerooted, vec![LeafRow::new("1", "//d:B[1]/d:p[1]")]);

    let truncated = extract_from_str(xml, &with_strategy(&options, "truncate")).unwrap();
    assert_eq!(
        truncated,
        vec![
            LeafRow::new("1", "//d:B[1]/d:p[1]"),
            LeafRow::new("2", "//d:B[2]/d:p[1]"),
        ]
    );
}

#[test]
fn test_ignored_branch_under_start_tag() {
    let xml = "<r><B><p>1</p><skip><p>2</p></skip><p>3</p></B></r>";
    let options = json!({
        "startAtTag": "B",
        "ignoreLeafNodes": ["skip"],
        "includeLeafValuePredicate": false
    });

    let rerooted = extract_from_str(xml, &with_strategy(&options, "reroot")).unwrap();
    let truncated = extract_from_str(xml, &with_strategy(&options, "truncate")).unwrap();

    assert_eq!(
        rerooted,
        vec![
            LeafRow::new("1", "//d:B[1]/d:p[1]"),
            LeafRow::new("3", "//d:B[1]/d:p[2]"),
        ]
    );
    assert_eq!(truncated, rerooted);
}

#[test]
fn test_start_tag_inside_ignored_subtree() {
    let xml = "<r><skip><body><p>secret</p></body></skip><p>x</p></r>";
    let options = json!({"ignoreLeafNodes": ["skip"], "startAtTag": "body"});

    let rerooted = extract_from_str(xml, &with_strategy(&options, "reroot")).unwrap();
    let truncated = extract_from_str(xml, &with_strategy(&options, "truncate")).unwrap();

    assert_eq!(rerooted, vec![LeafRow::new("x", r#"/d:r[1]/d:p[d:p="x"][1]"#)]);
    assert_eq!(truncated, rerooted);
}

#[test]
fn test_repeated_runs_are_identical() {
    let xml = load_fixture("catalog.xml");
    let config = config(json!({"attributesToIncludeInPath": ["id", "kind"]}));

    let first = extract_from_str(&xml, &config).unwrap();
    let second = extract_from_str(&xml, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_widget_scenario() {
    let xml = r#"<root><item id="7"><name>Widget</name></item></root>"#;

    let rows = extract_from_str(
        xml,
        &config(json!({"namespace": "d", "attributesToIncludeInPath": ["id"]})),
    )
    .unwrap();
    assert_eq!(
        rows,
        vec![LeafRow::new(
            "Widget",
            r#"/d:root[1]/d:item[@id="7"][1]/d:name[d:name="Widget"][1]"#
        )]
    );

    let ignored = extract_from_str(xml, &config(json!({"ignoreLeafNodes": ["item"]}))).unwrap();
    assert!(ignored.is_empty());
}

#[test]
fn test_save_csv_round_trip_to_disk() {
    let rows = extract_from_file(&fixture_path("catalog.xml"), &Config::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("rows.csv");
    save_rows(&rows, &path, OutputFormat::from_path(&path)).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, render_csv(&rows, true));
    assert_eq!(content.lines().count(), rows.len() + 1);
}
