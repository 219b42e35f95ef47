use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use itertools::Itertools;
use tracing_subscriber::EnvFilter;

use classlex::pattern::char_class::builtin_names;
use classlex::{Token, Tokenizer, UnmatchedInput, parse_env};

const DEFAULT_PATTERNS: [&str; 4] = ["{string}", "{word}", "{number}", "{symbol}"];

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to tokenize (reads stdin if omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Pattern to match, tried in the order given
    #[arg(short = 'p', long = "pattern", value_name = "PATTERN")]
    patterns: Vec<String>,

    /// Define a pattern class, e.g. `assignment={word}={number}`
    #[arg(short = 'c', long = "class", value_name = "NAME=PATTERN")]
    classes: Vec<String>,

    /// Run the tokenizer once per line
    #[arg(short = 'l', long)]
    lines: bool,

    /// Parse the input as a .env file and print the variables
    #[arg(long)]
    env: bool,

    /// What to do with input no pattern matches
    #[arg(long, value_enum, default_value_t = Unmatched::Skip)]
    unmatched: Unmatched,

    /// Print the built-in and defined classes, then exit
    #[arg(long)]
    list_classes: bool,

    /// Log matched and skipped input to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Unmatched {
    Skip,
    Log,
    Error,
}

impl From<Unmatched> for UnmatchedInput {
    fn from(value: Unmatched) -> Self {
        match value {
            Unmatched::Skip => UnmatchedInput::Skip,
            Unmatched::Log => UnmatchedInput::Log,
            Unmatched::Error => UnmatchedInput::Error,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut tokenizer = Tokenizer::new();
    tokenizer.set_unmatched(args.unmatched.into());
    for class in &args.classes {
        let Some((name, pattern)) = class.split_once('=') else {
            bail!("class definition {class:?} is not NAME=PATTERN");
        };
        tokenizer.register_pattern_class(name, pattern);
    }
    if let Some(err) = tokenizer.registration_error() {
        bail!("invalid class definition: {err}");
    }

    if args.list_classes {
        let mut builtins: Vec<&str> = builtin_names().collect();
        builtins.sort_unstable();
        println!("built-in: {}", builtins.join(" "));
        println!("defined: {}", tokenizer.classes().sorted_names().join(" "));
        return Ok(());
    }

    let input = read_input(args.file.as_ref())?;

    if args.env {
        for (key, value) in parse_env(&input)? {
            println!("{key}={value:?}");
        }
        return Ok(());
    }

    let patterns: Vec<&str> = if args.patterns.is_empty() {
        DEFAULT_PATTERNS.to_vec()
    } else {
        args.patterns.iter().map(String::as_str).collect()
    };
    for pattern in patterns {
        tokenizer.pattern(pattern, |token, _| {
            println!("{}", describe(token));
            Ok(())
        });
    }

    if args.lines {
        for (number, line) in input.lines().enumerate() {
            tokenizer
                .run(line)
                .with_context(|| format!("line {}", number + 1))?;
        }
    } else {
        tokenizer.run(&input)?;
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("classlex=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut contents = String::new();
            io::stdin()
                .read_to_string(&mut contents)
                .context("failed to read stdin")?;
            Ok(contents)
        }
    }
}

/// `offset length lexeme class=lexeme...`
fn describe(token: &Token<'_>) -> String {
    let captures = token
        .captures()
        .flat_map(|(class, tokens)| tokens.iter().map(move |t| format!("{class}={:?}", t.lexeme)))
        .join(" ");
    format!("{}\t{}\t{:?}\t{}", token.pos, token.length, token.lexeme, captures)
        .trim_end()
        .to_string()
}
