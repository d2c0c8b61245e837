//! CLI integration tests for listener-lens

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Get the path to the test fixtures directory
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Get the path to the built binary
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_listener-lens"))
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).display().to_string()
}

/// Run the binary on the fixture records with extra arguments, returning parsed JSON
fn run_json(args: &[&str]) -> serde_json::Value {
    let output = Command::new(binary_path())
        .args(args)
        .args(["--json", "-q"])
        .arg(fixture("listeners.json"))
        .output()
        .expect("Failed to run binary");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

mod cli_behavior {
    use super::*;

    #[test]
    fn test_help_flag() {
        let output = Command::new(binary_path())
            .arg("--help")
            .output()
            .expect("Failed to run binary");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Reformat and highlight"));
        assert!(stdout.contains("--prettify"));
        assert!(stdout.contains("--rules"));
        assert!(stdout.contains("--html"));
    }

    #[test]
    fn test_version_flag() {
        let output = Command::new(binary_path())
            .arg("--version")
            .output()
            .expect("Failed to run binary");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("listener-lens"));
    }

    #[test]
    fn test_missing_input_argument() {
        let output = Command::new(binary_path())
            .output()
            .expect("Failed to run binary");

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("INPUT") || stderr.contains("required"));
    }

    #[test]
    fn test_conflicting_output_formats() {
        let output = Command::new(binary_path())
            .args(["--json", "--html"])
            .arg(fixture("listeners.json"))
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("conflict"));
    }

    #[test]
    fn test_nonexistent_input() {
        let output = Command::new(binary_path())
            .arg("/nonexistent/listeners.json")
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Cannot open"));
    }

    #[test]
    fn test_invalid_records() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("bad.json");
        fs::write(&input, "{\"listener\": 5}").unwrap();

        let output = Command::new(binary_path())
            .arg(&input)
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid listener records"));
    }

    #[test]
    fn test_reads_stdin() {
        let mut child = Command::new(binary_path())
            .args(["--json", "-q", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .expect("Failed to run binary");

        child
            .stdin
            .take()
            .unwrap()
            .write_all(br#"[{"listener":"a<b"}]"#)
            .unwrap();

        let output = child.wait_with_output().unwrap();
        assert!(output.status.success());
        let json: serde_json::Value =
            serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
        assert_eq!(json["listeners"][0]["markup"], "a&lt;b");
    }
}

mod rendering {
    use super::*;

    #[test]
    fn test_plain_render_escapes_only() {
        let json = run_json(&[]);

        let listeners = json["listeners"].as_array().unwrap();
        assert_eq!(listeners.len(), 4);
        assert_eq!(json["summary"]["formatted"], 0);
        assert_eq!(
            listeners[1]["markup"],
            "function(e){document.body.innerHTML=e.data.html;}"
        );
        assert_eq!(listeners[3]["domain"], "unknown");
        assert_eq!(listeners[3]["stack"], "Unknown stack");
    }

    #[test]
    fn test_prettify_and_highlight() {
        let rules = fixture("rules.txt");
        let json = run_json(&["--prettify", "-r", &rules]);

        let first = &json["listeners"][0];
        assert_eq!(
            first["display_text"],
            "function(e){\n    if(e.origin!==\"https://trusted.example\"){\n        return;\n    }\n    eval(e.data);\n}"
        );

        let markup = first["markup"].as_str().unwrap();
        assert!(markup.contains(
            r#"    if(<span class="highlight-orange">e.origin</span>!==&quot;https://trusted.example&quot;){"#
        ));
        assert!(markup.contains(
            r#"    <span class="highlight-red">eval</span>(<span class="highlight-blue">e.data</span>);"#
        ));

        assert_eq!(first["window_text"], "top direct");
        assert_eq!(json["listeners"][1]["window_text"], "top.frames[0] top.frames[0]");
        assert_eq!(json["summary"]["formatted"], 4);
    }

    #[test]
    fn test_repeated_source_hits_cache() {
        let output = Command::new(binary_path())
            .arg("--prettify")
            .arg(fixture("listeners.json"))
            .output()
            .expect("Failed to run binary");

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("Format cache: 1 hits, 3 misses"),
            "stderr: {}",
            stderr
        );
    }

    #[test]
    fn test_size_ceiling_skips_formatting() {
        let json = run_json(&["--prettify", "--max-format-size", "20"]);

        assert_eq!(json["summary"]["skipped_for_size"], 4);
        assert_eq!(json["summary"]["formatted"], 0);
        assert_eq!(
            json["listeners"][1]["display_text"],
            "function(e){document.body.innerHTML=e.data.html;}"
        );
        assert_eq!(json["listeners"][1]["skipped_for_size"], true);
    }

    #[test]
    fn test_truncation_threshold() {
        let json = run_json(&["--prettify", "--max-lines", "3"]);

        assert_eq!(json["listeners"][0]["truncated"], true);
        assert_eq!(json["listeners"][1]["truncated"], false);
    }

    #[test]
    fn test_html_output() {
        let temp = TempDir::new().unwrap();
        let out_path = temp.path().join("panel.html");

        let output = Command::new(binary_path())
            .args(["--html", "--prettify", "-q", "-r"])
            .arg(fixture("rules.txt"))
            .arg(fixture("listeners.json"))
            .arg(&out_path)
            .output()
            .expect("Failed to run binary");

        assert!(output.status.success());
        let html = fs::read_to_string(&out_path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("4 listeners"));
        assert!(html.contains(r#"<span class="highlight-red">innerHTML</span>"#));
        assert!(html.contains(r#"<div class="domain-name">shop.example.com</div>"#));
    }

    #[test]
    fn test_console_output() {
        let output = Command::new(binary_path())
            .args(["--prettify", "-q"])
            .arg(fixture("listeners.json"))
            .output()
            .expect("Failed to run binary");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("#1 shop.example.com  top direct"));
        assert!(stdout.contains("      eval(e.data);"));
        assert!(stdout.contains("Listeners rendered: 4"));
    }
}

mod rule_storage {
    use super::*;

    #[test]
    fn test_save_and_reload_rules() {
        let temp = TempDir::new().unwrap();
        let saved = temp.path().join("rules.json");

        let output = Command::new(binary_path())
            .args(["-q", "--json", "-r"])
            .arg(fixture("rules.txt"))
            .arg("--save-rules")
            .arg(&saved)
            .arg(fixture("listeners.json"))
            .output()
            .expect("Failed to run binary");
        assert!(output.status.success());

        let persisted: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&saved).unwrap()).unwrap();
        assert_eq!(persisted["version"], 1);
        let categories = persisted["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0]["name"], "red");
        assert_eq!(categories[2]["name"], "blue");
        assert_eq!(categories[0]["terms"][1], "innerHTML");

        // The saved set renders the same as the text it came from
        let from_text = run_json(&["-r", &fixture("rules.txt")]);
        let from_json = run_json(&["-r", saved.to_str().unwrap()]);
        assert_eq!(from_text["listeners"], from_json["listeners"]);
    }

    #[test]
    fn test_unsupported_rules_version() {
        let temp = TempDir::new().unwrap();
        let rules = temp.path().join("rules.json");
        fs::write(&rules, r#"{"version":7,"categories":[]}"#).unwrap();

        let output = Command::new(binary_path())
            .arg("-r")
            .arg(&rules)
            .arg(fixture("listeners.json"))
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("version 7"));
    }
}
