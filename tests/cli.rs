use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct TestEnv {
    _tmp: TempDir,
    catalog: PathBuf,
    courses: PathBuf,
    ledger: PathBuf,
    root: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().to_path_buf();

        let catalog = root.join("courseData.csv");
        fs::write(
            &catalog,
            "CS101|Introduction to Computing|08:00-09:30|MWF|R204|3\n\
             CS111|Discrete Structures|11:00-12:30|TTh|R105|3\n\
             PE101|Physical Education 1|07:00-09:00|Sat|GYM|2\n",
        )
        .expect("write catalog fixture");

        let courses = root.join("courses.txt");
        fs::write(&courses, "BSCS\nBSIT\n").expect("write course fixture");

        Self {
            _tmp: tmp,
            catalog,
            courses,
            ledger: root.join("enrollees.csv"),
            root,
        }
    }

    /// Command with the given subcommand and the sandboxed data-file paths.
    fn cmd(&self, subcommand: &str) -> Command {
        let mut cmd = Command::cargo_bin("enroll").unwrap();
        // Keep side files (logs/) inside the sandbox.
        cmd.current_dir(&self.root)
            .arg(subcommand)
            .arg("--catalog")
            .arg(&self.catalog)
            .arg("--courses")
            .arg(&self.courses)
            .arg("--ledger")
            .arg(&self.ledger);
        cmd
    }

    /// A `submit` command with every field filled; `id` is the only knob the
    /// tests vary.
    fn submit_cmd(&self, id: &str) -> Command {
        let mut cmd = self.cmd("submit");
        cmd.args([
            "--id",
            id,
            "--last-name",
            "Reyes",
            "--first-name",
            "Ana",
            "--middle-name",
            "Lim",
            "--course",
            "BSCS",
            "--semester",
            "1st",
            "--school-year",
            "2023-2024",
            "--date",
            "2023-08-14",
            "--year-level",
            "1",
            "--class",
            "CS101",
            "--class",
            "CS111",
        ]);
        cmd
    }

    fn write_ledger(&self, lines: &[&str]) {
        let mut raw = lines.join("\n");
        raw.push('\n');
        fs::write(&self.ledger, raw).expect("write ledger fixture");
    }
}

fn read_ledger(path: &Path) -> String {
    fs::read_to_string(path).expect("ledger exists after submit")
}

#[test]
fn submit_appends_the_exact_record() {
    let env = TestEnv::new();
    env.submit_cmd("2023-00117")
        .assert()
        .success()
        .stdout(contains("Registered Reyes, Ana, Lim for 2 class(es), 6 unit(s)."));

    let raw = read_ledger(&env.ledger);
    assert_eq!(
        raw,
        "2023-00117|Reyes, Ana, Lim|BSCS|1st|2023-2024|2023-08-14|1|New|CS101|CS111\n"
    );
}

#[test]
fn submit_twice_appends_without_rewriting() {
    let env = TestEnv::new();
    for _ in 0..2 {
        env.submit_cmd("2023-00117").assert().success();
    }

    let raw = read_ledger(&env.ledger);
    assert_eq!(raw.lines().count(), 2);
    assert_eq!(raw.lines().next(), raw.lines().last());
}

#[test]
fn submit_with_blank_id_fails_as_incomplete() {
    let env = TestEnv::new();
    env.submit_cmd("  ")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("incomplete form: ID number is required"));

    assert!(!env.ledger.exists());
}

#[test]
fn report_counts_courses_from_the_ledger() {
    let env = TestEnv::new();
    env.write_ledger(&[
        "1|Reyes, Ana, Lim|BSCS|1st|2023-2024|2023-08-14|1|New|CS101",
        "2|Cruz, Ben, Tan|BSCS|1st|2023-2024|2023-08-14|1|Old|CS111",
        "3|Santos, Eva, Uy|BSIT|1st|2023-2024|2023-08-14|2|Transferee",
    ]);

    env.cmd("report")
        .assert()
        .success()
        .stdout(contains("BSCS"))
        .stdout(contains("BSIT"))
        .stdout(contains("66.67%"))
        .stdout(contains("registrations: 3"));
}

#[test]
fn report_exports_json() {
    let env = TestEnv::new();
    env.write_ledger(&["1|Reyes, Ana, Lim|BSCS|1st|2023-2024|2023-08-14|1|New"]);

    let out = env.root.join("report.json");
    env.cmd("report")
        .arg("--export")
        .arg(&out)
        .assert()
        .success();

    let raw = fs::read_to_string(&out).expect("export written");
    assert!(raw.contains("\"BSCS\""));
    assert!(raw.contains("\"total\": 1"));
}

#[test]
fn report_on_missing_ledger_is_no_data_not_an_error() {
    let env = TestEnv::new();
    env.cmd("report")
        .assert()
        .success()
        .stdout(contains("No enrollment data available."));
}

#[test]
fn report_on_malformed_ledger_fails_as_report_error() {
    let env = TestEnv::new();
    env.write_ledger(&[
        "1|Reyes, Ana, Lim|BSCS|1st|2023-2024|2023-08-14|1|New",
        "garbage-line",
    ]);

    env.cmd("report")
        .assert()
        .failure()
        .code(3)
        .stderr(contains("line 2"));
}

#[test]
fn catalog_command_lists_entries() {
    let env = TestEnv::new();
    env.cmd("catalog")
        .assert()
        .success()
        .stdout(contains("CS101"))
        .stdout(contains("Discrete Structures"))
        .stdout(contains("entries: 3"));
}
