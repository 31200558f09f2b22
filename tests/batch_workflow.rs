// tests/batch_workflow.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use batch_kit::{
    ConfReader, Report, ReportOptions, SaveOptions, Setting, TableSpec, Value, dump_data, load_data,
    read_table, report, save_data,
};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("batch_kit_it_{}_{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn quiet_report(dir: &Path) -> Report {
    Report::open(ReportOptions::new(dir, "run.rep").header("batch started").echo(false)).unwrap()
}

#[test]
fn saved_table_reads_back() {
    let dir = scratch("table");
    let rows = [[0.5, 1.0, 2.0], [1.5, 3.0, 4.0], [2.5, 5.0, 6.0]];
    let path = save_data(
        &["t", "a", "b"],
        &rows,
        dir.join("scan.dat"),
        SaveOptions::new().remark("scan 1"),
    )
    .unwrap();
    assert_eq!(path, dir.join("scan-table.txt"));

    let spec = TableSpec::new().cols([2, 0]).keys(["b", "t"]);
    let table = read_table(&path, &spec).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.named("b").unwrap(),
        &[Value::Number(2.0), Value::Number(4.0), Value::Number(6.0)]
    );
    assert_eq!(table.numbers(&"t".into()).unwrap(), vec![0.5, 1.5, 2.5]);
}

#[test]
fn missing_table_is_none() {
    let dir = scratch("missing");
    assert!(read_table(dir.join("nope.txt"), &TableSpec::new()).is_none());
}

#[test]
fn report_logs_every_step() {
    let dir = scratch("report");
    let mut rep = quiet_report(&dir);
    report!(rep, "step", 1).unwrap();

    save_data(
        &["x"],
        &[[1]],
        dir.join("out.txt"),
        SaveOptions::new().remark("first").report(&mut rep),
    )
    .unwrap();
    let dumped = dump_data(&vec![1.0_f64, 2.0], dir.join("state"), Some(&mut rep))
        .unwrap()
        .unwrap();
    rep.close().unwrap();
    assert!(!rep.is_open());

    let text = fs::read_to_string(rep.path()).unwrap();
    let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].ends_with("batch started"));
    assert!(lines[1].ends_with("step 1"));
    assert!(lines[2].contains("Saving data to"));
    assert!(lines[3].ends_with("Remark: first"));
    assert!(lines[4].contains("Data dumped to:"));

    assert_eq!(dumped, dir.join("state.dat"));
    assert_eq!(load_data::<Vec<f64>>(&dumped).unwrap(), vec![1.0, 2.0]);
}

#[test]
fn config_file_with_defaults() {
    let dir = scratch("conf");
    let file = dir.join("run.conf");
    fs::write(
        &file,
        "# scan setup\nlimit = 2.5\nlimit = 3\nname = \"beam one\" # quoted\nverbose\nmode = fast # trailing\n",
    )
    .unwrap();

    let raw = ConfReader::new(&file).default("dpi", 150).read();
    assert_eq!(
        raw.get("limit"),
        Some(&Setting::List(vec![Value::Number(2.5), Value::Number(3.0)]))
    );
    assert_eq!(raw.number("dpi"), Some(150.0));

    let simple = ConfReader::new(&file).default("dpi", 150).simplify(false).read();
    assert_eq!(simple.number("limit"), Some(3.0));
    assert_eq!(simple.text("name"), Some("beam one"));
    assert_eq!(simple.text("mode"), Some("fast"));
    assert_eq!(simple.number("verbose"), Some(1.0));
}
