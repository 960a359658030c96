//! WordBench command line front end.
//!
//! Usage:
//!   wordbench [BATCH_FILE] [--key-width N] [--value-width N]
//!
//! Each command is the first character of a word read from standard input,
//! or first from `BATCH_FILE` when one is given; the rest of the word is the
//! command's argument. Set `RUST_LOG` to see the workbench's logs.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use llrb_tree::wordbench::{WordBench, WordBenchError};
use llrb_tree::ColumnLayout;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "wordbench")]
#[command(about = "Word frequency analysis of text files", version)]
struct Cli {
    /// Command file to run before switching to interactive input
    batch: Option<PathBuf>,

    /// Width of the word column in reports
    #[arg(long, default_value_t = 15)]
    key_width: usize,

    /// Width of the count column in reports
    #[arg(long, default_value_t = 15)]
    value_width: usize,
}

/// Whitespace-separated words of an input stream, read a line at a time.
struct Input {
    reader: Box<dyn BufRead>,
    pending: VecDeque<String>,
    batch: bool,
}

impl Input {
    fn new(reader: Box<dyn BufRead>, batch: bool) -> Self {
        Input {
            reader,
            pending: VecDeque::new(),
            batch,
        }
    }

    fn interactive() -> Self {
        Input::new(Box::new(io::stdin().lock()), false)
    }

    /// Returns the first character of the next word. The rest of the word
    /// stays queued, so `rnotes.txt` reads the same as `r notes.txt`.
    fn next_command(&mut self) -> io::Result<Option<char>> {
        let Some(word) = self.next_word()? else {
            return Ok(None);
        };
        let mut chars = word.chars();
        let command = chars.next();
        if !chars.as_str().is_empty() {
            self.pending.push_front(chars.as_str().to_owned());
        }
        Ok(command)
    }

    /// Returns the next word, echoing it in batch mode, or `None` at end of input.
    fn next_word(&mut self) -> io::Result<Option<String>> {
        io::stdout().flush()?;
        loop {
            if let Some(word) = self.pending.pop_front() {
                if self.batch {
                    println!("{word}");
                }
                return Ok(Some(word));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

fn display_menu() {
    println!();
    println!("     WB Command                     key");
    println!("     ----------                     ---");
    println!("     Read a file  ................  'r'");
    println!("     show Summary  ...............  's'");
    println!("     Write report  ...............  'w'");
    println!("     Clear current data  .........  'c'");
    println!("     eXit BATCH mode  ............  'x'");
    println!("     display Menu  ...............  'm'");
    println!("     Quit program  ...............  'q'");
}

/// Prompts for file names until `attempt` gets past opening one.
///
/// Returns false if input ran out first.
fn with_file_name<F>(input: &mut Input, mut attempt: F) -> io::Result<bool>
where
    F: FnMut(&str) -> Result<(), WordBenchError>,
{
    print!("  Enter file name: ");
    while let Some(name) = input.next_word()? {
        match attempt(&name) {
            Err(WordBenchError::Open { .. }) => {
                println!("    ** Cannot open file {name}");
                print!("    Try another file name: ");
            }
            Err(error) => {
                tracing::warn!(%error, "file operation failed");
                println!("    ** {error}");
                return Ok(true);
            }
            Ok(()) => return Ok(true),
        }
    }
    Ok(false)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let layout = ColumnLayout::new(cli.key_width, cli.value_width);
    let mut input = match &cli.batch {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("cannot open batch file {}", path.display()))?;
            Input::new(Box::new(BufReader::new(file)), true)
        }
        None => Input::interactive(),
    };

    println!("Welcome to WordBench, a Text Analysis Utility.");
    if !input.batch {
        display_menu();
    }

    let mut bench = WordBench::new();
    loop {
        print!("\nWB command ('m' for menu, 'q' to exit): ");
        let Some(command) = input.next_command()? else {
            break;
        };
        let more = match command.to_ascii_lowercase() {
            'r' => with_file_name(&mut input, |name| bench.read_text(name).map(drop))?,
            'w' => with_file_name(&mut input, |name| {
                if !bench.write_report(name, &layout)? {
                    println!("  No files in read list, leaving {name} unopened");
                }
                Ok(())
            })?,
            's' => {
                println!("{}", bench.summary());
                true
            }
            'c' => {
                bench.clear_data();
                println!("\n     Current data erased");
                true
            }
            'm' => {
                display_menu();
                true
            }
            'x' if input.batch => {
                println!("  switching to interactive mode");
                input = Input::interactive();
                display_menu();
                true
            }
            'x' => {
                println!("  already in interactive mode");
                true
            }
            'q' => false,
            _ => {
                println!("\n     ** Command not found -- try again");
                true
            }
        };
        if !more {
            break;
        }
    }

    println!("\nWordBench wishes you a nice day.");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    run(&cli)
}
