//! Golden tests for codemerge
//!
//! These tests run the binary against a checked-in fixture tree and verify:
//! - Stable traversal order in the merge artifact
//! - Report totals agree with the per-file counts
//! - Repeated runs produce identical output

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get the path to the sample project
fn sample_project() -> PathBuf {
    fixtures_dir().join("sample_project")
}

/// Files the sample project should contribute, in traversal order
const SAMPLE_FILES: [&str; 3] = ["README.md", "docs/guide.md", "src/main.rs"];

/// Create a command for running the codemerge binary
fn codemerge_cmd() -> Command {
    let mut cmd = Command::cargo_bin("codemerge").expect("Failed to find codemerge binary");
    cmd.env_remove("OUTPUT_FILE")
        .env_remove("RUST_LOG")
        .arg("--no-color")
        .arg("--root")
        .arg(sample_project());
    cmd
}

fn tokens_report() -> Value {
    let output = codemerge_cmd()
        .args(["tokens", "--format", "json", "--verbose=false"])
        .output()
        .expect("failed to execute");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Merge Tests ====================

    #[test]
    fn golden_merge_artifact() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("merged.txt");

        let output = codemerge_cmd()
            .args(["merge", "-q", "-o"])
            .arg(&out)
            .output()
            .expect("failed to execute");
        assert!(output.status.success());

        let mut expected = String::new();
        for rel in SAMPLE_FILES {
            let content = fs::read_to_string(sample_project().join(rel)).unwrap();
            expected.push_str(&format!("File: {}\n{}\n", rel, content));
        }

        assert_eq!(fs::read_to_string(&out).unwrap(), expected);
    }

    #[test]
    fn golden_merge_applies_root_gitignore() {
        assert!(sample_project().join("scratch.tmp").is_file());
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("merged.txt");

        codemerge_cmd()
            .args(["merge", "-q", "-o"])
            .arg(&out)
            .assert()
            .success();

        let merged = fs::read_to_string(&out).unwrap();
        assert!(!merged.contains("File: .gitignore"));
        assert!(!merged.contains("File: scratch.tmp"));
        assert!(!merged.contains("scratch notes"));
        assert_eq!(merged.matches("File: ").count(), SAMPLE_FILES.len());
    }

    // ==================== Tokens Tests ====================

    #[test]
    fn golden_tokens_report_structure() {
        let report = tokens_report();

        assert_eq!(report["files"], 3);
        let top = report["top"].as_array().expect("top is an array");
        assert_eq!(top.len(), 3);

        let mut paths: Vec<&str> = top.iter().filter_map(|f| f["path"].as_str()).collect();
        paths.sort();
        assert_eq!(paths, SAMPLE_FILES);

        for file in top {
            assert!(file.get("file_name").is_some(), "file_name required");
            assert!(file["tokens"].as_u64().unwrap() > 0);
        }
    }

    #[test]
    fn golden_tokens_total_is_sum() {
        let report = tokens_report();
        let sum: u64 = report["top"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["tokens"].as_u64().unwrap())
            .sum();
        assert_eq!(report["total"].as_u64().unwrap(), sum);
    }

    #[test]
    fn golden_tokens_largest_first() {
        let report = tokens_report();
        // The Rust source is by far the longest file in the fixture
        assert_eq!(report["top"][0]["path"], "src/main.rs");
        assert_eq!(report["top"][0]["file_name"], "main.rs");
    }

    #[test]
    fn golden_tokens_stable_across_runs() {
        assert_eq!(tokens_report(), tokens_report());
    }
}
