use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const DATE: &str = "2026-10-17";

fn write_doc(root: &Path, collection: &str, document: &str, value: Value) {
    let dir = root.join(collection);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{document}.json")), value.to_string()).unwrap();
}

/// Local store with a summary and Italy/France generation for `DATE`.
fn fixture() -> TempDir {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("store");
    write_doc(
        &root,
        "simulation_results",
        "latest_italy",
        json!({"records": {
            "data_analisi": DATE,
            "risparmio_annuale_italia_eur": 4.2e9,
            "risparmio_annuale_famiglia_eur": 168.0,
            "risparmio_percentuale": 26.0,
            "fabbisogno_mwh": 812345.6,
            "costo_attuale_eur": 89358016.0,
            "costo_simulato_eur": 66124931.84,
            "pun_usato_eur_mwh": 110.0
        }}),
    );
    write_doc(
        &root,
        "daily_generation_italy",
        DATE,
        json!({"records": [
            {"psrType": "B16", "quantity_MW": 100.0},
            {"psrType": "B19", "quantity_MW": 300.0}
        ]}),
    );
    write_doc(
        &root,
        "daily_generation_france",
        DATE,
        json!({"records": [{"psrType": "B14", "quantity_MW": 40000.0}]}),
    );
    tmp
}

fn emon(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("emon").unwrap();
    cmd.env("HOME", home)
        .env_remove("EMON_FIRESTORE_PROJECT_ID")
        .env_remove("EMON_FIRESTORE_API_KEY")
        .env_remove("EMON_FIRESTORE_BASE_URL")
        .env_remove("EMON_LOCAL_ROOT");
    cmd
}

fn store_arg(tmp: &TempDir) -> String {
    tmp.path().join("store").to_str().unwrap().to_string()
}

#[test]
fn emon_show_prints_dashboard() {
    let tmp = fixture();
    emon(tmp.path())
        .args(["show", "--local-root", &store_arg(&tmp), "--date", DATE])
        .assert()
        .success()
        .stdout(predicate::str::contains("€ 4.20"))
        .stdout(predicate::str::contains("812.346"))
        .stdout(predicate::str::contains("Wind Onshore"))
        .stdout(predicate::str::contains("(75.0%)"))
        .stdout(predicate::str::contains("(100.0%)"))
        .stdout(predicate::str::contains("No generation data for 2026-10-17"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn emon_show_expand_prints_totals() {
    let tmp = fixture();
    emon(tmp.path())
        .args(["show", "--local-root", &store_arg(&tmp), "--date", DATE, "--expand", "--ascii"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-Total Production: 40,000 MWh"));
}

#[test]
fn emon_html_writes_page() {
    let tmp = fixture();
    let out = tmp.path().join("site").join("index.html");
    emon(tmp.path())
        .args([
            "html",
            "--local-root",
            &store_arg(&tmp),
            "--date",
            DATE,
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let page = fs::read_to_string(&out).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains(r#"id="kpi-annual-saving">€ 4.20<"#));
    assert!(page.contains(r#"id="italy-chart-container""#));
    assert!(page.contains("ascii-details"));
}

#[test]
fn emon_html_narrow_viewport_limits_rows() {
    let tmp = fixture();
    let root = tmp.path().join("store");
    let codes = ["B01", "B04", "B05", "B10", "B11", "B12", "B14", "B16"];
    let records: Vec<Value> = codes
        .iter()
        .enumerate()
        .map(|(i, c)| json!({"psrType": c, "quantity_MW": 100.0 + i as f64}))
        .collect();
    write_doc(&root, "daily_generation_spain", DATE, json!({ "records": records }));

    let output = emon(tmp.path())
        .args([
            "html",
            "--local-root",
            &store_arg(&tmp),
            "--date",
            DATE,
            "--countries",
            "spain",
            "--viewport-width",
            "375",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let page = String::from_utf8(output.stdout).unwrap();
    assert_eq!(page.matches(r#"class="ascii-row""#).count(), 5);
}

#[test]
fn emon_missing_summary_is_not_an_error() {
    let tmp = fixture();
    fs::remove_file(
        tmp.path()
            .join("store")
            .join("simulation_results")
            .join("latest_italy.json"),
    )
    .unwrap();

    emon(tmp.path())
        .args(["show", "--local-root", &store_arg(&tmp), "--date", DATE])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analysis date: --"))
        .stdout(predicate::str::contains("Wind Onshore"))
        .stderr(predicate::str::contains("simulation document not found"));
}

#[test]
fn emon_malformed_document_keeps_partial_page() {
    let tmp = fixture();
    write_doc(
        &tmp.path().join("store"),
        "daily_generation_france",
        DATE,
        json!({"records": [{"quantity_MW": 1.0}]}),
    );

    emon(tmp.path())
        .args(["show", "--local-root", &store_arg(&tmp), "--date", DATE])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Wind Onshore"))
        .stdout(predicate::str::contains("(100.0%)").not())
        .stderr(predicate::str::contains("loading dashboard"));
}

#[test]
fn emon_check_reports_documents() {
    let tmp = fixture();
    emon(tmp.path())
        .args(["check", "--local-root", &store_arg(&tmp), "--date", DATE])
        .assert()
        .success()
        .stdout(predicate::str::contains("simulation_results/latest_italy"))
        .stdout(predicate::str::contains("analysis date 2026-10-17"))
        .stdout(predicate::str::contains("daily_generation_spain/2026-10-17"))
        .stdout(predicate::str::contains("missing"))
        .stdout(predicate::str::contains("\"pun_usato_eur_mwh\": 110.0"));
}

#[test]
fn emon_firestore_requires_project_id() {
    let tmp = tempdir().unwrap();
    emon(tmp.path())
        .args(["show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project_id"));
}

#[test]
fn emon_config_show_redacts_key() {
    let tmp = tempdir().unwrap();
    emon(tmp.path())
        .args(["config", "show", "--project-id", "energymonitor", "--api-key", "s3cr3t"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project_id = \"energymonitor\""))
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("s3cr3t").not());
}

#[test]
fn emon_config_init_and_load() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("emon.toml");
    let path_arg = path.to_str().unwrap();

    emon(tmp.path())
        .args(["--config", path_arg, "config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    emon(tmp.path())
        .args(["--config", path_arg, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    fs::write(&path, "[page]\ndays_ago = 5\n").unwrap();
    emon(tmp.path())
        .args(["--config", path_arg, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("days_ago = 5"));
}

#[test]
fn emon_config_file_selects_local_store() {
    let tmp = fixture();
    let path = tmp.path().join("emon.toml");
    fs::write(
        &path,
        format!(
            "[store]\nkind = \"local\"\nlocal_root = {:?}\n\n[page]\ndate = \"{DATE}\"\ncountries = [\"italy\"]\n",
            store_arg(&tmp)
        ),
    )
    .unwrap();

    emon(tmp.path())
        .args(["--config", path.to_str().unwrap(), "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solar"))
        .stdout(predicate::str::contains("France").not());
}

#[test]
fn emon_completions_bash() {
    let tmp = tempdir().unwrap();
    emon(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("emon"));
}
