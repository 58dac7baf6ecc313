use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use csv_tabs::app::Session;
use csv_tabs::export::ExportFormat;
use csv_tabs::import::ParseOptions;
use csv_tabs::logging;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Delimited files to open, one tab each
    file_paths: Vec<PathBuf>,

    /// File with editing commands to run, one per line
    #[arg(long, short = 's')]
    script: Option<PathBuf>,

    /// Export every tab in this format after editing (csv, xlsx or json); repeatable
    #[arg(long, short = 'e')]
    export: Vec<ExportFormat>,

    /// Directory for exported files
    #[arg(long, short = 'o', default_value = ".")]
    out_dir: PathBuf,

    /// Field delimiter of the input files
    #[arg(long, short = 'd', default_value = ",")]
    delimiter: char,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    if !cli.delimiter.is_ascii() {
        anyhow::bail!("Invalid delimiter: {}", cli.delimiter);
    }
    let parse_options = ParseOptions {
        delimiter: cli.delimiter as u8,
    };

    let mut session = Session::new(cli.out_dir.clone(), parse_options);

    for path in &cli.file_paths {
        session.import_file(path, None)?;
    }

    if let Some(script) = &cli.script {
        let content = std::fs::read_to_string(script)
            .with_context(|| format!("Unable to read script: {}", script.display()))?;
        for line in content.lines() {
            run_command(&mut session, line);
            if session.should_quit {
                break;
            }
        }
    } else if !std::io::stdin().is_terminal() {
        for line in std::io::stdin().lock().lines() {
            run_command(&mut session, &line?);
            if session.should_quit {
                break;
            }
        }
    } else if cli.export.is_empty() {
        run_prompt(&mut session)?;
    }

    for format in &cli.export {
        let written = session.export_all(*format)?;
        for path in written {
            eprintln!("Exported to {}", path.display());
        }
    }

    Ok(())
}

fn run_command(session: &mut Session, line: &str) {
    session.execute_command(line);
    for message in session.take_notifications() {
        eprintln!("{}", message);
    }
}

fn run_prompt(session: &mut Session) -> Result<()> {
    let stdin = std::io::stdin();
    let mut line = String::new();

    eprintln!("Type help for a list of commands.");
    while !session.should_quit {
        eprint!("> ");
        std::io::stderr().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        run_command(session, &line);
    }

    Ok(())
}
