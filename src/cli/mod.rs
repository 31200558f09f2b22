mod handlers;
pub mod parse;

use clap::Parser;
pub use parse::Cli;

pub fn run() -> anyhow::Result<()> {
    let cli = parse::Cli::parse();
    match cli.cmd {
        parse::Command::Conf(a) => {
            handlers::conf(&a);
            Ok(())
        }
        parse::Command::Table(a) => handlers::table(&a),
        parse::Command::Plot(a) => handlers::plot(&a),
        parse::Command::Colors => {
            handlers::colors();
            Ok(())
        }
        parse::Command::Examples => {
            handlers::examples();
            Ok(())
        }
    }
}
