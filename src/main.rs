use std::{
    io::{self, Read},
    path::PathBuf,
};

use ucdnames::{load_cached, Table, Visualization};

const DEFAULT_TABLE_PATH: &str = "data/ucd.bin";
const TABLE_PATH_VAR: &str = "UCDNAMES_TABLE";
const USAGE: &str = "usage: ucdnames [--table <PATH>] [--ranges] [TEXT]...";

#[derive(Debug, PartialEq, Eq)]
struct Config {
    table_path: PathBuf,
    dump_ranges: bool,
    /// `None` means read standard input
    text: Option<String>,
}

impl Config {
    fn from_args(
        mut args: impl Iterator<Item = String>,
        table_from_env: Option<String>,
    ) -> anyhow::Result<Self> {
        let mut table_path = table_from_env.map(PathBuf::from);
        let mut dump_ranges = false;
        let mut words = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--table" => match args.next() {
                    Some(path) => table_path = Some(PathBuf::from(path)),
                    None => anyhow::bail!("--table needs a path\n{}", USAGE),
                },
                "--ranges" => dump_ranges = true,
                "--" => {
                    words.extend(args.by_ref());
                }
                flag if flag.starts_with("--") => {
                    anyhow::bail!("unknown flag {}\n{}", flag, USAGE)
                }
                word => words.push(word.to_owned()),
            }
        }

        Ok(Self {
            table_path: table_path.unwrap_or_else(|| PathBuf::from(DEFAULT_TABLE_PATH)),
            dump_ranges,
            text: if words.is_empty() {
                None
            } else {
                Some(words.join(" "))
            },
        })
    }
}

fn read_stdin() -> io::Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;

    let trimmed = text.trim_end_matches(&['\r', '\n'][..]).len();
    text.truncate(trimmed);

    Ok(text)
}

fn dump_ranges(table: &Table) -> anyhow::Result<()> {
    for range in table.ranges() {
        println!("{}", range?);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_args(
        std::env::args().skip(1),
        std::env::var(TABLE_PATH_VAR).ok(),
    )?;

    if config.dump_ranges {
        return dump_ranges(load_cached(&config.table_path)?);
    }

    let text = match config.text {
        Some(text) => text,
        None => read_stdin()?,
    };

    // names are optional, the breakdown is still useful without them
    let table = match load_cached(&config.table_path) {
        Ok(table) => Some(table),
        Err(err) => {
            log::error!(
                "failed to load table {}: {}",
                config.table_path.display(),
                err
            );
            None
        }
    };

    print!("{}", Visualization::new(&text, table));

    Ok(())
}
