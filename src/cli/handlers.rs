use std::{fs::File, path::Path};

use anyhow::{Context, bail};

use crate::{
    core::{
        color::{AnsiCode, SGR_CODES, colorize},
        conf::ConfReader,
        report::{Report, ReportOptions},
        table::{Table, TableSpec, numeric_rows, read_rows, read_table},
        value::Value,
    },
    plot::{Figures, PlotOptions},
};

use super::parse::{ConfArgs, PlotArgs, TableArgs};

pub fn conf(a: &ConfArgs) {
    let mut reader = ConfReader::new(&a.file);
    if a.simplify {
        reader = reader.simplify(a.strict);
    }
    reader.read().dump();
}

fn load(file: &Path, spec: &TableSpec) -> anyhow::Result<Table> {
    match read_table(file, spec) {
        Some(t) => Ok(t),
        None => bail!("cannot read table {}", file.display()),
    }
}

pub fn table(a: &TableArgs) -> anyhow::Result<()> {
    let spec = TableSpec::new()
        .sep(a.sep.as_str())
        .cols(a.cols.iter().copied())
        .keys(a.keys.iter().map(String::as_str))
        .fill(Value::coerce(&a.fill));
    let table = load(&a.file, &spec)?;

    for col in table.iter() {
        let cells: Vec<String> = col.values.iter().map(ToString::to_string).collect();
        let key = colorize(&AnsiCode::industrial_orange(), &col.key.to_string());
        println!("{key}: {}", cells.join(" "));
    }
    Ok(())
}

fn report_for(path: &Path) -> anyhow::Result<Report> {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("report path {} has no file name", path.display()))?;
    let opts = ReportOptions::new(dir, name.to_string_lossy()).echo(false);
    Ok(Report::open(opts)?)
}

pub fn plot(a: &PlotArgs) -> anyhow::Result<()> {
    let mut cols = vec![a.x, a.y];
    if let (Some(xe), Some(ye)) = (a.xerr, a.yerr) {
        cols.extend([xe, ye]);
    }
    let file = File::open(&a.file).with_context(|| format!("cannot read table {}", a.file.display()))?;
    let rows = read_rows(file, &TableSpec::new().sep(a.sep.as_str()))?;
    let points = numeric_rows(&rows, &cols);
    let column = |i: usize| -> Vec<f64> { points.iter().map(|p| p[i]).collect() };
    let (x, y) = (column(0), column(1));

    let mut opts = PlotOptions::new()
        .fmt(a.fmt.as_str())
        .log(a.log.as_str())
        .title(a.title.as_str())
        .xlabel(a.xlabel.as_str())
        .ylabel(a.ylabel.as_str())
        .filename(a.filename.as_str())
        .outpath(&a.out)
        .ext(a.ext.as_str())
        .dpi(a.dpi)
        .show(!a.no_preview);
    if cols.len() == 4 {
        opts = opts.errors(column(2), column(3));
    }

    let mut report = a.report.as_deref().map(report_for).transpose()?;
    if let Some(rep) = report.as_mut() {
        crate::report!(rep, "plotting", a.file.display(), "points:", x.len())?;
    }

    let saved = Figures::new().plot(&x, &y, &opts)?;

    if let Some(path) = &saved {
        println!("saved {}", path.display());
    }
    if let Some(mut rep) = report {
        if let Some(path) = &saved {
            crate::report!(rep, "figure saved to:", path.display())?;
        }
        rep.close()?;
    }
    Ok(())
}

/// Every color name, printed in its own color.
pub fn colors() {
    println!("\nPossible colors:");
    for (name, code) in SGR_CODES {
        println!("{}", colorize(&AnsiCode::Sgr(*code), name));
    }
    println!(
        "{}  (#505050 or any other #RRGGBB)\n",
        colorize(&AnsiCode::Rgb(0x50, 0x50, 0x50), "#505050")
    );
}

/// Print handy invocations for new users.
pub fn examples() {
    let bin = "batchkit";
    println!(
        "
Example invocations
-------------------
• Config file      : {bin} conf run.conf --simplify
• Two columns      : {bin} table data.txt --cols 0,2 --keys t,v
• CSV fields       : {bin} table data.csv --sep , --fill nan
• Quick look       : {bin} plot data.txt --x 0 --y 1 --fmt b-
• Log-log export   : {bin} plot data.txt --log xy --filename fit --out plots
• Error bars       : {bin} plot data.txt --xerr 2 --yerr 3 --fmt ro --ext svg --filename fit
• With a report    : {bin} plot data.txt --filename fit --report run.rep
"
    );
}
