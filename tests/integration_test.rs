use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::Server;
use tempfile::tempdir;

fn releases_page_body(download_count: u64) -> String {
    format!(
        r#"[
            {{
                "tag_name": "v1.0.0",
                "prerelease": false,
                "assets": [
                    {{
                        "name": "tool-x86_64-unknown-linux-gnu.tar.gz",
                        "download_count": {count},
                        "size": 8388608,
                        "browser_download_url": "https://example.com/tool-linux.tar.gz"
                    }},
                    {{
                        "name": "tool.exe",
                        "download_count": 7,
                        "size": 4194304,
                        "browser_download_url": "https://example.com/tool.exe"
                    }}
                ]
            }},
            {{
                "tag_name": "v0.9.0",
                "prerelease": false,
                "assets": [
                    {{
                        "name": "old.tar.gz",
                        "download_count": 999,
                        "size": 1024,
                        "browser_download_url": "https://example.com/old.tar.gz"
                    }}
                ]
            }}
        ]"#,
        count = download_count
    )
}

fn mock_releases(server: &mut Server, body: &str) -> (mockito::Mock, mockito::Mock) {
    let page1 = server
        .mock("GET", "/repos/owner/repo/releases?per_page=100&page=1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create();
    let page2 = server
        .mock("GET", "/repos/owner/repo/releases?per_page=100&page=2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();
    (page1, page2)
}

#[test]
fn test_end_to_end_track() {
    let mut server = Server::new();
    let url = server.url();
    let (_page1, _page2) = mock_releases(&mut server, &releases_page_body(42));

    let data_dir = tempdir().unwrap();

    let mut cmd = Command::new(cargo::cargo_bin!("relstat"));
    cmd.arg("track")
        .arg("owner/repo")
        .arg("--prefix")
        .arg("v1.0.0")
        .arg("--data-dir")
        .arg(data_dir.path())
        .arg("--api-url")
        .arg(&url);

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Total downloads across 2 assets: 49"));

    let asset_log =
        std::fs::read_to_string(data_dir.path().join("download_history.csv")).unwrap();
    assert!(asset_log.starts_with("timestamp,release_tag,asset_name"));
    assert!(asset_log.contains("tool-x86_64-unknown-linux-gnu.tar.gz"));
    assert!(!asset_log.contains("old.tar.gz"));

    let totals = std::fs::read_to_string(data_dir.path().join("daily_totals.csv")).unwrap();
    assert!(totals.starts_with("date,timestamp,total_downloads"));
    assert!(totals.lines().nth(1).unwrap().ends_with(",49"));

    let history =
        std::fs::read_to_string(data_dir.path().join("download_history.json")).unwrap();
    assert!(history.contains("\"v1.0.0\""));
    assert!(!history.contains("\"v0.9.0\""));
}

#[test]
fn test_track_twice_records_zero_daily_change() {
    let mut server = Server::new();
    let url = server.url();
    let body = releases_page_body(42);

    let data_dir = tempdir().unwrap();
    let (_page1, _page2) = mock_releases(&mut server, &body);

    for _ in 0..2 {
        let mut cmd = Command::new(cargo::cargo_bin!("relstat"));
        cmd.arg("track")
            .arg("owner/repo")
            .arg("--data-dir")
            .arg(data_dir.path())
            .arg("--api-url")
            .arg(&url);
        cmd.assert().success();
    }

    let history =
        std::fs::read_to_string(data_dir.path().join("download_history.json")).unwrap();
    assert!(history.contains("\"daily_change\": 0"));

    // Same-day rerun replaces the history entry but appends to the CSV logs
    let totals = std::fs::read_to_string(data_dir.path().join("daily_totals.csv")).unwrap();
    assert_eq!(totals.lines().count(), 3);
}

#[test]
fn test_track_aborts_on_api_error() {
    let mut server = Server::new();
    let url = server.url();

    let _mock = server
        .mock("GET", "/repos/owner/repo/releases?per_page=100&page=1")
        .with_status(500)
        .create();

    let data_dir = tempdir().unwrap();

    let mut cmd = Command::new(cargo::cargo_bin!("relstat"));
    cmd.arg("track")
        .arg("owner/repo")
        .arg("--data-dir")
        .arg(data_dir.path())
        .arg("--api-url")
        .arg(&url);

    cmd.assert().failure();
    assert!(!data_dir.path().join("download_history.json").exists());
}

#[test]
fn test_track_rejects_invalid_repo() {
    let mut cmd = Command::new(cargo::cargo_bin!("relstat"));
    cmd.arg("track").arg("not-a-repo");

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Expected 'owner/repo'"));
}

#[test]
fn test_report_before_any_tracking() {
    let data_dir = tempdir().unwrap();

    let mut cmd = Command::new(cargo::cargo_bin!("relstat"));
    cmd.arg("report").arg("--data-dir").arg(data_dir.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("No download history found"));
}

#[test]
fn test_end_to_end_report() {
    let data_dir = tempdir().unwrap();
    std::fs::write(
        data_dir.path().join("download_history.json"),
        r#"{
            "2026-08-25": {
                "total_downloads": 40,
                "releases": {
                    "v1.0.0": {
                        "total_downloads": 40,
                        "assets": [{
                            "timestamp": "2026-08-25T08:00:00+00:00",
                            "release_tag": "v1.0.0",
                            "asset_name": "tool-x86_64-unknown-linux-gnu.tar.gz",
                            "download_count": 40,
                            "asset_size": 8388608,
                            "asset_url": "https://example.com/tool.tar.gz"
                        }]
                    }
                }
            },
            "2026-08-26": {
                "total_downloads": 49,
                "releases": {
                    "v1.0.0": {
                        "total_downloads": 42,
                        "assets": [{
                            "timestamp": "2026-08-26T08:00:00+00:00",
                            "release_tag": "v1.0.0",
                            "asset_name": "tool-x86_64-unknown-linux-gnu.tar.gz",
                            "download_count": 42,
                            "asset_size": 8388608,
                            "asset_url": "https://example.com/tool.tar.gz",
                            "daily_change": 2
                        }]
                    },
                    "v1.0.0-beta.9": {
                        "total_downloads": 7,
                        "assets": [{
                            "timestamp": "2026-08-26T08:00:00+00:00",
                            "release_tag": "v1.0.0-beta.9",
                            "asset_name": "tool.exe",
                            "download_count": 7,
                            "asset_size": 4194304,
                            "asset_url": "https://example.com/tool.exe",
                            "daily_change": 7
                        }]
                    }
                }
            }
        }"#,
    )
    .unwrap();

    let mut cmd = Command::new(cargo::cargo_bin!("relstat"));
    cmd.arg("report").arg("--data-dir").arg(data_dir.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Summary for 2026-08-26:"))
        .stdout(predicates::str::contains("Total Downloads: 49"))
        .stdout(predicates::str::contains("Daily Change: +9"))
        .stdout(predicates::str::contains("v1.0.0: 42 downloads"));

    assert!(data_dir.path().join("downloads_timeline.png").exists());
    assert!(data_dir.path().join("downloads_by_platform.png").exists());
    assert!(data_dir.path().join("downloads_by_release.png").exists());
}
