use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use plainpy::translate;

#[derive(Parser)]
#[command(
    name = "plainpy",
    version,
    about = "Translate plain English into Python"
)]
struct Cli {
    /// English text to translate; reads stdin when absent
    text: Option<String>,

    /// Read the input from a file instead
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Emit the full translation result as JSON instead of just the code
    #[arg(long)]
    json: bool,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let input = match (cli.text, cli.file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let result = translate(&input);
    let rendered = if cli.json {
        result.to_json()
    } else {
        result.generated_code.clone()
    };

    match cli.output {
        Some(path) => fs::write(&path, rendered + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", rendered),
    }

    // Plain-code mode still surfaces follow-up hints on stderr
    if !cli.json {
        for suggestion in &result.suggestions {
            eprintln!("hint: {}", suggestion);
        }
    }

    Ok(())
}
