//! Exeme Lexer CLI
//!
//! Lexes a single source file and prints its tokens. Any lexical error is
//! rendered against the source line and ends the process with status 1.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use exeme::{logging, Diagnostic, Lexer, LexerConfig, TokenStream, VERSION};

#[derive(Parser)]
#[command(name = "exeme", version = VERSION, about = "Exeme lexical front end")]
struct Cli {
    /// Source file to lex
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Emit comment tokens instead of discarding comments
    #[arg(long)]
    emit_comments: bool,

    /// Allow char, string and numeric literals to continue past the end of a line
    #[arg(long)]
    multiline_literals: bool,

    /// Only check the file, do not print tokens
    #[arg(long)]
    check: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    logging::init(logging::level_for_verbosity(cli.verbose));

    let config = LexerConfig::new()
        .with_comment_tokens(cli.emit_comments)
        .with_multiline_literals(cli.multiline_literals);

    let result = Lexer::open(&cli.file).and_then(|lexer| lexer.with_config(config).tokenize());

    match result {
        Ok(tokens) => {
            if !cli.check {
                print_tokens(&cli.file, &tokens);
            }
        }
        Err(err) => {
            let diagnostic = Diagnostic::from_file(err);
            if cli.no_color {
                print!("{}", diagnostic.format_plain());
            } else {
                print!("{}", diagnostic.format());
            }
            process::exit(1);
        }
    }
}

/// Show tokens from lexing a file
fn print_tokens(file: &Path, tokens: &TokenStream) {
    println!("Tokens for '{}':", file.display());
    println!("{}", "=".repeat(72));

    for (i, token) in tokens.iter().enumerate() {
        println!(
            "{:4}: {:40} | {:>4}:{:<3}-{:>3} | {:?}",
            i,
            token.kind.description(),
            token.span.line,
            token.span.start_column,
            token.span.end_column,
            token.lexeme
        );
    }

    println!("{}", "=".repeat(72));
    println!("Total tokens: {}", tokens.len());
}
