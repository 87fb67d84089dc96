use std::io::{self, Write};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use dictionary::Dictionary;
use render::Presenter;
use tracing_subscriber::EnvFilter;

mod render;

/// Look up English word definitions and print them as panels.
#[derive(Debug, Parser)]
#[command(name = "rich-dictionary", version)]
struct Args {
    /// The word to look up dictionary definitions for.
    #[arg(value_parser = parse_word)]
    word: String,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,

    /// Log details about the request to stderr (-vv for more).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose)?;
    tracing::debug!(?args, "starting lookup");

    let dict = Dictionary::new()?;
    let outcome = dict.lookup(&args.word);

    let presenter = Presenter::new(!args.no_color && console::colors_enabled());
    let mut stdout = io::stdout().lock();
    presenter.render(&outcome, &args.word, &mut stdout)?;
    stdout.flush()?;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to set up logging: {error}"))
}

fn parse_word(word: &str) -> Result<String, String> {
    let word = word.trim();
    if word.is_empty() {
        return Err("the word must not be empty".to_owned());
    }
    Ok(word.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_is_trimmed() {
        let args = Args::try_parse_from(["rich-dictionary", "  hamburger "]).unwrap();
        assert_eq!(args.word, "hamburger");
        assert!(!args.no_color);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn blank_or_missing_word_is_rejected() {
        assert!(Args::try_parse_from(["rich-dictionary", "   "]).is_err());
        assert!(Args::try_parse_from(["rich-dictionary"]).is_err());
    }

    #[test]
    fn flags_are_parsed() {
        let args =
            Args::try_parse_from(["rich-dictionary", "--no-color", "-vv", "word"]).unwrap();
        assert!(args.no_color);
        assert_eq!(args.verbose, 2);
    }
}
