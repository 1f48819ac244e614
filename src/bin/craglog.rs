use std::io::{BufRead, Write, stdin, stdout};
use std::str::FromStr;

use miette::{IntoDiagnostic, Result, miette};
use strum::EnumString;

use craglog::{COLUMN_COUNT, Direction, LABELS, Logbook, Snapshot, column_type};

/// REPL verbs, parsed case-insensitively from the first word of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
enum Command {
    Show,
    Sort,
    Search,
    Clear,
    Help,
    Exit,
}

const WIDTHS: [usize; COLUMN_COUNT] = [4, 20, 6, 7, 16, 10, 12, 0];

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(false)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();

    setup_logging();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| miette!("usage: craglog <export.csv>"))?;

    let mut logbook = Logbook::new();
    let count = logbook.ingest_path(&path)?;
    println!("{count} routes loaded from {path}");

    let mut buf = String::new();

    let mut stdin = stdin().lock();
    let mut stdout = stdout().lock();

    loop {
        stdout.write_all("log: ".as_bytes()).into_diagnostic()?;
        stdout.flush().into_diagnostic()?;

        let Ok(_) = stdin.read_line(&mut buf) else {
            return Err(miette!("Input reading failed"));
        };

        let input = buf.trim();
        if input.is_empty() {
            buf.clear();
            continue;
        }

        match run_command(&mut logbook, input, &mut stdout) {
            Ok(true) => break,
            Ok(false) => {}
            Err(err) => println!("{err:?}"),
        }

        buf.clear();
    }

    println!("Tanquem. Bones vies!");

    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("craglog=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// Runs one REPL line; returns `Ok(true)` when the user asked to exit.
fn run_command(logbook: &mut Logbook, input: &str, out: &mut impl Write) -> Result<bool> {
    let (verb, rest) = match input.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (input, ""),
    };

    let command =
        Command::from_str(verb).map_err(|_| miette!("unknown command '{verb}', try 'help'"))?;

    match command {
        Command::Show => render(&logbook.snapshot(), out)?,
        Command::Sort => {
            let mut args = rest.split_whitespace();

            let column = args
                .next()
                .ok_or_else(|| miette!("usage: sort <column 0-{}> [asc|desc]", COLUMN_COUNT - 1))?
                .parse::<usize>()
                .map_err(|_| miette!("column must be a number, see 'help'"))?;

            match args.next() {
                Some(token) => {
                    let direction = Direction::from_str(token)
                        .map_err(|_| miette!("direction must be 'asc' or 'desc'"))?;
                    logbook.sort(column, direction);
                }
                // Bare `sort N` behaves like a header click
                None => logbook.toggle_sort(column),
            }

            render(&logbook.snapshot(), out)?;
        }
        Command::Search => {
            logbook.set_query(rest);
            let found = logbook.snapshot().rows.len();
            println!("{found} routes match '{rest}'");
        }
        Command::Clear => {
            logbook.set_query("");
            println!("search cleared");
        }
        Command::Help => help(),
        Command::Exit => return Ok(true),
    }

    Ok(false)
}

fn render(snapshot: &Snapshot<'_>, out: &mut impl Write) -> Result<()> {
    for (index, label) in LABELS.iter().enumerate() {
        let arrow = if index == snapshot.sort.column {
            match snapshot.sort.direction {
                Direction::Ascending => " ^",
                Direction::Descending => " v",
            }
        } else {
            ""
        };

        out.write_all(
            format!("| {:<width$} ", format!("{label}{arrow}"), width = WIDTHS[index]).as_bytes(),
        )
        .into_diagnostic()?;
    }
    out.write_all(b"|\n").into_diagnostic()?;

    for row in &snapshot.rows {
        for (index, &width) in WIDTHS.iter().enumerate() {
            let cell = row.field(index);
            let cell = if cell.is_empty() { "-" } else { cell };
            out.write_all(format!("| {cell:<width$} ").as_bytes())
                .into_diagnostic()?;
        }
        out.write_all(b"|\n").into_diagnostic()?;
    }

    out.flush().into_diagnostic()?;
    Ok(())
}

fn help() {
    println!("commands:");
    println!("  show                     print the current view");
    println!("  sort <col> [asc|desc]    sort by column; no direction toggles like a header click");
    println!("  search <text>            filter by substring over name, grade, face and zone");
    println!("  clear                    drop the search filter");
    println!("  exit");
    println!("columns:");
    for (index, label) in LABELS.iter().enumerate() {
        println!("  {index}  {label} ({})", column_type(index));
    }
}
