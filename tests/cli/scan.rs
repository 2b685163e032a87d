use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

fn scan_json(test: &CliTest, extra: &[&str]) -> Result<Value> {
    let output = test
        .scan_command()
        .args(["--format", "json"])
        .args(extra)
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_scan_single_nugget() -> Result<()> {
    let test = CliTest::with_file("app.js", "[[[Hello///greet]]]")?;

    assert_cmd_snapshot!(test.scan_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    app
      "Hello"
        --> app.js (offset 0)
        = note: greet

    ✓ Found 1 nugget in 1 source file

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_scan_merges_across_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Views/Home/Index.cshtml", "<h1>[[[Welcome///greet]]]</h1>")?;
    test.write_file("Views/Home/About.cshtml", "[[[Welcome///greet]]] [[[Welcome///farewell]]]")?;
    test.write_file("Scripts/site.js", "alert('[[[Hello %0|||name]]]');")?;

    let json = scan_json(&test, &[])?;

    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["Hello %0", "Welcome"]);

    let welcome = &json["Welcome"];
    assert_eq!(welcome["sourceFileHint"], "About");
    assert_eq!(welcome["comments"], serde_json::json!(["greet", "farewell"]));
    let sources: Vec<_> = welcome["references"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["sourcePath"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        sources,
        vec![
            "Views/Home/About.cshtml",
            "Views/Home/About.cshtml",
            "Views/Home/Index.cshtml"
        ]
    );

    Ok(())
}

#[test]
fn test_scan_respects_white_and_black_lists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".nuggetrc.json",
        r#"{ "whiteList": ["*.cshtml", "Web.config"], "blackList": ["bin"] }"#,
    )?;
    test.write_file("Index.cshtml", "[[[Kept]]]")?;
    test.write_file("Web.config", "[[[Config]]]")?;
    test.write_file("notes.txt", "[[[Ignored]]]")?;
    test.write_file("bin/Debug/Index.cshtml", "[[[Built]]]")?;

    let json = scan_json(&test, &[])?;

    let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["Config", "Kept"]);

    Ok(())
}

#[test]
fn test_scan_disable_references() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("a.js", "[[[Save]]]")?;
    test.write_file("b.js", "[[[Save]]]")?;

    let json = scan_json(&test, &["--disable-references"])?;

    assert_eq!(json["Save"]["references"], serde_json::json!([]));

    Ok(())
}

#[test]
fn test_scan_context_from_comment() -> Result<()> {
    let test = CliTest::with_file("a.js", "[[[Open///menu]]] [[[Open///door]]] [[[Open]]]")?;

    let json = scan_json(&test, &["--context-from-comment"])?;

    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["menu\u{4}Open", "door\u{4}Open", "Open"]);
    assert_eq!(json["door\u{4}Open"]["messageText"], "Open");

    Ok(())
}

#[test]
fn test_scan_explicit_paths() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/a.js", "[[[Inside]]]")?;
    test.write_file("other/b.js", "[[[Outside]]]")?;

    let json = scan_json(&test, &["src"])?;

    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["Inside"]);
    assert_eq!(json["Inside"]["references"][0]["sourcePath"], "src/a.js");

    Ok(())
}

#[test]
fn test_scan_malformed_file_is_skipped() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("good.js", "[[[Fine]]]")?;
    test.write_file("bad.js", "[[[]]] [[[Lost]]]")?;

    let output = test.scan_command().output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(stdout.contains("\"Fine\""));
    assert!(!stdout.contains("Lost"));
    assert!(stderr.contains("warning: 1 path(s) skipped during scan (use -v for details)"));

    let verbose = test.scan_command().arg("-v").output()?;
    let stderr = String::from_utf8_lossy(&verbose.stderr);
    assert!(stderr.contains("warning: Skipped"));
    assert!(stderr.contains("bad.js"));

    Ok(())
}

#[test]
fn test_scan_fail_empty() -> Result<()> {
    let test = CliTest::with_file("a.js", "no markers here")?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(0));

    let output = test.scan_command().arg("--fail-empty").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No nuggets found in 1 source file"));

    Ok(())
}

#[test]
fn test_scan_unreadable_roots_is_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.scan_command().arg("missing").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("Error: None of the directories to scan could be read")
    );

    Ok(())
}

#[test]
fn test_scan_invalid_config_is_error() -> Result<()> {
    let test = CliTest::with_file(".nuggetrc.json", r#"{ "nuggetBeginToken": "" }"#)?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));

    Ok(())
}
