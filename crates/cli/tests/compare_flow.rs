use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::tempdir;

const ENTERPRISE_DOC: &str = r#"{
    "id": "enterprise",
    "title": "Microsoft 365 Enterprise",
    "taxonomy": {
        "tiers": ["E3", "E5"],
        "categories": [
            {
                "name": "Security",
                "features": [
                    {
                        "name": "Microsoft Defender",
                        "description": "Threat protection",
                        "status": { "E3": "Limited", "E5": "Included" }
                    }
                ]
            },
            {
                "name": "Identity",
                "features": [
                    {
                        "name": "Entra ID Plan 1",
                        "description": "Identity basics",
                        "status": { "E3": "Included", "E5": "Included" }
                    },
                    {
                        "name": "Entra ID Plan 2",
                        "description": "Risk-based identity protection",
                        "status": { "E3": "No", "E5": "Included" }
                    }
                ]
            }
        ]
    }
}"#;

const BUSINESS_DOC: &str = r#"{
    "id": "business",
    "title": "Microsoft 365 Business",
    "taxonomy": {
        "tiers": ["Basic", "Premium"],
        "categories": [
            {
                "name": "Security",
                "features": [
                    {
                        "name": "Defender for Business",
                        "description": "Endpoint protection for small organizations",
                        "link": "https://example.com/defender-business",
                        "status": { "Basic": "Add-on", "Premium": "Included" }
                    }
                ]
            }
        ]
    }
}"#;

fn write_docs(root: &Path) {
    fs::write(root.join("enterprise.json"), ENTERPRISE_DOC).unwrap();
    fs::write(root.join("business.json"), BUSINESS_DOC).unwrap();
}

fn run_json(root: &Path, args: &[&str]) -> Value {
    let output = Command::cargo_bin("tierlens")
        .expect("binary")
        .current_dir(root)
        .args(args)
        .output()
        .expect("command run");

    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn merge_unifies_selected_tiers_across_documents() {
    let temp = tempdir().unwrap();
    write_docs(temp.path());

    let response = run_json(
        temp.path(),
        &[
            "merge",
            "--doc",
            "enterprise.json",
            "--doc",
            "business.json",
            "--select",
            "enterprise:E3",
            "--select",
            "enterprise:E5",
            "--select",
            "business:Premium",
            "--json",
        ],
    );

    let columns = response["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[2]["label"], "Microsoft 365 Business - Premium");
    assert_eq!(columns[2]["key"], "business:Premium");

    let categories = response["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);

    // "Microsoft Defender" and "Defender for Business" land in one row.
    let defender = &categories[0]["features"][0];
    assert_eq!(defender["name"], "Microsoft Defender");
    assert_eq!(defender["status"]["enterprise:E3"], "partial");
    assert_eq!(defender["status"]["enterprise:E5"], "included");
    assert_eq!(defender["status"]["business:Premium"], "included");
    assert_eq!(defender["is_diff"], true);
    assert_eq!(defender["link"], "https://example.com/defender-business");
    assert_eq!(
        defender["description"],
        "Endpoint protection for small organizations"
    );

    // Plan 1 and Plan 2 stay separate rows.
    assert_eq!(categories[1]["features"].as_array().unwrap().len(), 2);
}

#[test]
fn view_applies_query_filter_to_merged_output() {
    let temp = tempdir().unwrap();
    write_docs(temp.path());

    let response = run_json(
        temp.path(),
        &[
            "view",
            "--doc",
            "enterprise.json",
            "--doc",
            "business.json",
            "--select",
            "enterprise:E3",
            "--select",
            "enterprise:E5",
            "--select",
            "business:Premium",
            "--query",
            "defender",
            "--json",
        ],
    );

    let categories = response["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["name"], "Security");
    assert_eq!(
        categories[0]["features"][0]["cells"],
        json!(["partial", "included", "included"])
    );
}

#[test]
fn presence_detail_renders_grant_booleans() {
    let temp = tempdir().unwrap();
    write_docs(temp.path());

    let response = run_json(
        temp.path(),
        &[
            "view",
            "--doc",
            "enterprise.json",
            "--doc",
            "business.json",
            "--select",
            "enterprise:E3",
            "--select",
            "enterprise:E5",
            "--select",
            "business:Premium",
            "--query",
            "plan 2",
            "--detail",
            "presence",
            "--json",
        ],
    );

    let features = response["categories"][0]["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["name"], "Entra ID Plan 2");
    assert_eq!(features[0]["cells"], json!([false, true, false]));
}

#[test]
fn sources_lists_loaded_documents() {
    let temp = tempdir().unwrap();
    write_docs(temp.path());

    let response = run_json(
        temp.path(),
        &[
            "sources",
            "--doc",
            "enterprise.json",
            "--doc",
            "business.json",
            "--json",
        ],
    );

    let sources = response.as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["id"], "enterprise");
    assert_eq!(sources[0]["tiers"], json!(["E3", "E5"]));
    assert_eq!(sources[1]["id"], "business");
    assert_eq!(sources[1]["features"], 1);
}

#[test]
fn unresolvable_selection_entries_are_dropped_not_fatal() {
    let temp = tempdir().unwrap();
    write_docs(temp.path());

    let response = run_json(
        temp.path(),
        &[
            "merge",
            "--doc",
            "enterprise.json",
            "--select",
            "ghost:X",
            "--select",
            "enterprise:E3",
            "--json",
        ],
    );

    let columns = response["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0]["key"], "enterprise:E3");
}

#[test]
fn bad_select_spec_is_a_usage_error() {
    let temp = tempdir().unwrap();
    write_docs(temp.path());

    Command::cargo_bin("tierlens")
        .unwrap()
        .current_dir(temp.path())
        .args(["merge", "--doc", "enterprise.json", "--select", "enterpriseE3", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--select expects SOURCE:TIER"));
}

#[test]
fn missing_documents_is_an_error() {
    let temp = tempdir().unwrap();

    Command::cargo_bin("tierlens")
        .unwrap()
        .current_dir(temp.path())
        .args(["merge", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No source documents"));
}
