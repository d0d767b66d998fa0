mod common;

use common::{init_db_with_employees, pc, setup_test_db, temp_out};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use std::fs;

#[test]
fn test_init_creates_schema_and_defaults() {
    let db_path = setup_test_db("cli_init");

    pc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    pc().args(["--db", &db_path, "departments"])
        .assert()
        .success()
        .stdout(contains("Assembly").and(contains("Fabrication")));

    pc().args(["--db", &db_path, "locations"])
        .assert()
        .success()
        .stdout(contains("Main Shop"));
}

#[test]
fn test_employee_add_and_list() {
    let db_path = setup_test_db("cli_employee_list");
    init_db_with_employees(&db_path);

    pc().args(["--db", &db_path, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Alice Martin").and(contains("E002")).and(contains("Assembly")));

    // codes are unique
    pc().args([
        "--db", &db_path, "employee", "add", "--name", "Other", "--code", "E001",
    ])
    .assert()
    .failure()
    .stderr(contains("already in use"));
}

#[test]
fn test_punch_and_duplicate() {
    let db_path = setup_test_db("cli_punch_duplicate");
    init_db_with_employees(&db_path);

    pc().args(["--db", &db_path, "punch", "E001", "--action", "in", "--job", "M-7"])
        .assert()
        .success()
        .stdout(contains("Punch recorded: Alice Martin IN (job M-7)"));

    pc().args(["--db", &db_path, "punch", "E001", "-a", "in", "-j", "M-7"])
        .assert()
        .failure()
        .stderr(contains("Duplicate punch"));

    // another job is a new punch
    pc().args(["--db", &db_path, "punch", "E001", "-a", "in", "-j", "M-8"])
        .assert()
        .success();

    pc().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("punch_rejected").and(contains("Alice Martin IN")));
}

#[test]
fn test_punch_rejections() {
    let db_path = setup_test_db("cli_punch_rejections");
    init_db_with_employees(&db_path);

    pc().args(["--db", &db_path, "punch", "E001", "--action", "lunch"])
        .assert()
        .failure()
        .stderr(contains("invalid punch action"));

    pc().args(["--db", &db_path, "punch", "NOPE"])
        .assert()
        .failure()
        .stderr(contains("Employee not found"));

    pc().args(["--db", &db_path, "punch", "E001", "--location", "Moon Base"])
        .assert()
        .failure()
        .stderr(contains("unknown location"));

    pc().args(["--db", &db_path, "employee", "deactivate", "E001"])
        .assert()
        .success();

    pc().args(["--db", &db_path, "punch", "E001"])
        .assert()
        .failure()
        .stderr(contains("Employee not found"));

    pc().args(["--db", &db_path, "employee", "activate", "E001"])
        .assert()
        .success();

    pc().args(["--db", &db_path, "punch", "E001"])
        .assert()
        .success();
}

#[test]
fn test_report_csv_to_stdout() {
    let db_path = setup_test_db("cli_report_stdout");
    init_db_with_employees(&db_path);

    pc().args(["--db", &db_path, "punch", "E001", "-a", "in"])
        .assert()
        .success();
    pc().args(["--db", &db_path, "punch", "E001", "-a", "out"])
        .assert()
        .success();

    pc().args(["--db", &db_path, "report"])
        .assert()
        .success()
        .stdout(
            contains(",,QR Time Punch System,,,")
                .and(contains("Employee,Date,Department,Location,Action,M_Number,Timestamp,Duration"))
                .and(contains("Alice Martin"))
                .and(contains("TOTAL")),
        );

    // nothing outside the range
    pc().args(["--db", &db_path, "report", "--range", "2000"])
        .assert()
        .success()
        .stdout(contains("TOTAL").not());

    // employee filter by code
    pc().args(["--db", &db_path, "report", "--employee", "E002"])
        .assert()
        .success()
        .stdout(contains("Alice Martin").not());

    pc().args(["--db", &db_path, "report", "--employee", "E404"])
        .assert()
        .failure()
        .stderr(contains("Employee not found"));
}

#[test]
fn test_report_json_file() {
    let db_path = setup_test_db("cli_report_json");
    init_db_with_employees(&db_path);

    pc().args(["--db", &db_path, "punch", "E002", "-a", "in"])
        .assert()
        .success();

    let out = temp_out("cli_report_json", "json");

    pc().args([
        "--db", &db_path, "report", "--format", "json", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).expect("read exported json");
    let v: Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(v["title"], "QR Time Punch System");

    let entries = v["entries"].as_array().expect("entries array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["employee"], "Bob Stone");
    assert_eq!(entries[1]["kind"], "total");
}

#[test]
fn test_report_file_rules() {
    let db_path = setup_test_db("cli_report_file_rules");
    init_db_with_employees(&db_path);

    pc().args([
        "--db", &db_path, "report", "--file", "relative.csv",
    ])
    .assert()
    .failure()
    .stderr(contains("must be absolute"));

    pc().args(["--db", &db_path, "report", "--format", "xlsx"])
        .assert()
        .failure()
        .stderr(contains("XLSX output needs --file"));

    let out = temp_out("cli_report_file_rules", "csv");
    fs::write(&out, "OLD_CONTENT").expect("create file");

    // declining the prompt keeps the file
    pc().args(["--db", &db_path, "report", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "OLD_CONTENT");

    pc().args(["--db", &db_path, "report", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("QR Time Punch System"));
}

#[test]
fn test_employee_import() {
    let db_path = setup_test_db("cli_employee_import");
    pc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let roster = temp_out("cli_employee_import", "csv");
    fs::write(
        &roster,
        "name,qr_code_value,department,location\n\
         Dana Cruz,Q-1,IT,Office\n\
         Eli Park,Q-2,Admin,Field Site\n\
         ,Q-3,IT,Office\n",
    )
    .expect("write roster");

    pc().args(["--db", &db_path, "employee", "import", &roster])
        .assert()
        .success()
        .stdout(contains("Imported 2 employee(s), 1 skipped"));

    pc().args(["--db", &db_path, "punch", "Q-2"])
        .assert()
        .success()
        .stdout(contains("Eli Park IN"));
}
