use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use luatype::{normalize_whitespace, render, Token, Tokenizer, TokenizerConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Canonical annotation text.
    Text,
    /// Rust debug tree.
    Debug,
    /// One JSON array per annotation.
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Annotations to tokenize. Read line by line from stdin when none are given.
    annotations: Vec<String>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Tokenize as the inside of a bracket pair, where commas are separators
    #[arg(short, long)]
    group: bool,

    /// Delete all whitespace before tokenizing
    #[arg(short, long)]
    normalize: bool,

    /// Path to a JSON tokenizer config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the config's nesting limit
    #[arg(long)]
    max_depth: Option<usize>,

    /// Fail on unterminated brackets
    #[arg(long)]
    strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> anyhow::Result<TokenizerConfig> {
    let mut config = match &cli.config {
        Some(path) => TokenizerConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TokenizerConfig::default(),
    };
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }
    if cli.strict {
        config.strict_brackets = true;
    }
    Ok(config)
}

fn write_tokens(out: &mut impl Write, format: Format, tokens: &[Token]) -> anyhow::Result<()> {
    match format {
        Format::Text => writeln!(out, "{}", render(tokens))?,
        Format::Debug => writeln!(out, "{:#?}", tokens)?,
        Format::Json => writeln!(out, "{}", serde_json::to_string(tokens)?)?,
    }
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    debug!(?config, "config loaded");
    let tokenizer = Tokenizer::new(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut process = |annotation: &str| -> anyhow::Result<()> {
        let text = if cli.normalize {
            normalize_whitespace(annotation)
        } else {
            annotation.to_string()
        };
        let tokens = tokenizer
            .tokenize(&text, cli.group)
            .with_context(|| format!("failed to tokenize {:?}", annotation))?;
        write_tokens(&mut out, cli.format, &tokens)
    };

    if cli.annotations.is_empty() {
        info!("reading annotations from stdin");
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            process(&line)?;
        }
    } else {
        for annotation in &cli.annotations {
            process(annotation)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["luatype", "--max-depth", "3", "--strict", "x: number"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.max_depth, 3);
        assert!(config.strict_brackets);
        assert_eq!(cli.annotations, vec!["x: number".to_string()]);
    }

    #[test]
    fn formats() {
        let tokens = luatype::tokenize("(a, b) -> c", false).unwrap();

        let mut out = Vec::new();
        write_tokens(&mut out, Format::Text, &tokens).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(a, b) -> c\n");

        let mut out = Vec::new();
        write_tokens(&mut out, Format::Json, &tokens[1..]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[{\"type\":\"arrow\"},{\"type\":\"lua_type\",\"lua_type\":\"c\"}]\n"
        );
    }
}
