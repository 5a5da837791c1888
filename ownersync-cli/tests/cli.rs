//! Binary-level tests: flag handling, dry run, and a full run against a mock service.

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;

const ENV_VARS: [&str; 5] = [
    "OWNERSYNC_PLATFORM",
    "OWNERSYNC_FILE_NAMES",
    "OWNERSYNC_ENDPOINT",
    "OWNERSYNC_ORG_REPOS",
    "OWNERSYNC_CONCURRENCY",
];

fn ownersync() -> Command {
    let mut cmd = Command::cargo_bin("ownersync").expect("ownersync binary");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "info");
    cmd
}

#[test]
fn missing_endpoint_is_a_usage_error() {
    ownersync()
        .args(["--org-repos", "org"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--endpoint"));
}

#[test]
fn blank_endpoint_fails_validation() {
    ownersync()
        .args(["--endpoint", "", "--org-repos", "org"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("endpoint must be set"));
}

#[test]
fn zero_request_timeout_fails_validation() {
    ownersync()
        .args([
            "--endpoint",
            "http://sync.local",
            "--org-repos",
            "org",
            "--request-timeout-secs",
            "0",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("request timeout must be at least 1 second"));
}

#[test]
fn dry_run_prints_resolved_request() {
    let output = ownersync()
        .args([
            "--platform",
            "p",
            "--fileNames",
            "OWNERS,MAINTAINERS",
            "--endpoint",
            "http://unused.invalid",
            "--orgRepos",
            "org1/repoA,org1/repoB,org2",
            "--dry-run",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let requests: serde_json::Value = serde_json::from_slice(&output).expect("json stdout");
    let requests = requests.as_array().expect("array");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["platform"], "p");
    assert_eq!(
        requests[0]["file_names"],
        serde_json::json!(["OWNERS", "MAINTAINERS"])
    );

    let targets = requests[0]["targets"].as_array().expect("targets");
    assert_eq!(targets.len(), 2);
    for target in targets {
        match target["organization"].as_str() {
            Some("org1") => {
                assert_eq!(target["repositories"], serde_json::json!(["repoA", "repoB"]))
            }
            Some("org2") => assert_eq!(target["repositories"], serde_json::json!([])),
            other => panic!("unexpected organization: {other:?}"),
        }
    }
}

#[test]
fn unusable_endpoint_exits_cleanly_without_running() {
    ownersync()
        .args(["--endpoint", "not-a-url", "--org-repos", "org"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no sync client acquired"))
        .stderr(predicate::str::contains("sync run started").not());
}

#[test]
fn full_run_syncs_every_target_once() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/v1/sync")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "platform": "p",
            "file_names": ["OWNERS", "MAINTAINERS"],
        })))
        .with_status(200)
        .expect(3)
        .create();
    let url = server.url();

    ownersync()
        .args([
            "--platform",
            "p",
            "--file-names",
            "OWNERS,MAINTAINERS",
            "--endpoint",
            url.as_str(),
            "--org-repos",
            "org1/repoA,org1/repoB,org2",
            "--concurrency",
            "2",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("receive done. exit normally"))
        .stderr(predicate::str::contains("succeeded=3"))
        .stderr(predicate::str::contains("component=\"ownersync\""));

    mock.assert();
}

#[test]
fn failed_targets_do_not_fail_the_process() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/v1/sync")
        .with_status(500)
        .with_body("backend down")
        .expect(2)
        .create();
    let url = server.url();

    ownersync()
        .args(["--endpoint", url.as_str(), "--org-repos", "org/a,org/b"])
        .assert()
        .success()
        .stderr(predicate::str::contains("sync repo files failed"))
        .stderr(predicate::str::contains("failed=2"));
}

#[test]
fn json_logs_carry_the_component_field() {
    let mut server = Server::new();
    let _mock = server.mock("POST", "/v1/sync").with_status(200).create();
    let url = server.url();

    let output = ownersync()
        .args([
            "--endpoint",
            url.as_str(),
            "--org-repos",
            "org/a",
            "--log-format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stderr
        .clone();

    let lines: Vec<serde_json::Value> = String::from_utf8_lossy(&output)
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).expect("json log line"))
        .collect();
    assert!(!lines.is_empty());
    for line in &lines {
        assert_eq!(line["span"]["component"], "ownersync", "line: {line}");
    }
}
