//! Lexing real files on disk and rendering diagnostics against them.

use std::io::Write;

use exeme::{tokenize_file, Diagnostic, ExemeError, LexErrorKind, Lexer, LexerConfig, Span, TokenKind};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

const PROGRAM: &str = "\
import io

class Counter {
    # counts down
    value = 10
    step = 2.5
}

while value >= 0 {
    value -= step
}
";

fn fixture(source: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".exm")
        .tempfile()
        .expect("create temp file");
    file.write_all(source.as_bytes()).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

fn render_error(source: &str) -> (String, String) {
    let file = fixture(source);
    let path = file.path().display().to_string();
    let err = Lexer::open(file.path())
        .and_then(Lexer::tokenize)
        .expect_err("fixture should not lex");
    (path, Diagnostic::from_file(err).format_plain())
}

#[test]
fn lexes_program_from_disk() {
    let file = fixture(PROGRAM);
    let tokens = tokenize_file(file.path(), LexerConfig::default()).unwrap();

    let summary: Vec<(TokenKind, &str, usize)> = tokens
        .iter()
        .map(|t| (t.kind, t.lexeme.as_str(), t.span.line))
        .collect();
    assert_eq!(
        summary,
        vec![
            (TokenKind::Keyword, "import", 1),
            (TokenKind::Identifier, "io", 1),
            (TokenKind::Keyword, "class", 3),
            (TokenKind::Identifier, "Counter", 3),
            (TokenKind::OpenBrace, "{", 3),
            (TokenKind::Identifier, "value", 5),
            (TokenKind::Assign, "=", 5),
            (TokenKind::IntegerLiteral, "10", 5),
            (TokenKind::Identifier, "step", 6),
            (TokenKind::Assign, "=", 6),
            (TokenKind::FloatLiteral, "2.5", 6),
            (TokenKind::CloseBrace, "}", 7),
            (TokenKind::Keyword, "while", 9),
            (TokenKind::Identifier, "value", 9),
            (TokenKind::GreaterOrEqual, ">=", 9),
            (TokenKind::IntegerLiteral, "0", 9),
            (TokenKind::OpenBrace, "{", 9),
            (TokenKind::Identifier, "value", 10),
            (TokenKind::SubtractAssign, "-=", 10),
            (TokenKind::Identifier, "step", 10),
            (TokenKind::CloseBrace, "}", 11),
        ]
    );

    let path = file.path().display().to_string();
    assert!(tokens.iter().all(|t| t.source.as_deref() == Some(path.as_str())));
}

#[test]
fn comment_tokens_from_disk() {
    let file = fixture(PROGRAM);
    let config = LexerConfig::new().with_comment_tokens(true);
    let tokens = tokenize_file(file.path(), config).unwrap();

    let comment = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Comment)
        .expect("comment token");
    assert_eq!(comment.lexeme, " counts down");
    assert_eq!(comment.span, Span::new(4, 16, 4));
}

#[test]
fn two_lexers_produce_identical_streams() {
    let file = fixture(PROGRAM);
    let first = Lexer::open(file.path()).unwrap().tokenize().unwrap();
    let second = Lexer::open(file.path()).unwrap().tokenize().unwrap();
    assert_eq!(first, second);
}

#[test]
fn diagnostic_points_at_multi_character_char() {
    let source = "x = 1\nwhile x {\n    y = 'ab'\n}\n";
    let (path, rendered) = render_error(source);

    assert_eq!(
        rendered,
        format!(
            "--> {}\n3 |     y = 'ab'\n            ^^^\nerror: multi-character char\n",
            path
        )
    );

    // the carets sit under exactly the offending characters
    let lines: Vec<&str> = rendered.lines().collect();
    let source_line = lines[1];
    let caret_line = lines[2];
    let start = caret_line.find('^').unwrap();
    let end = caret_line.rfind('^').unwrap();
    assert_eq!(&source_line[start..=end], "'ab");
}

#[test]
fn diagnostic_points_at_second_decimal_point() {
    let source = "a = 1\n\nb = 2\ntotal = 10.5.1\n";
    let (path, rendered) = render_error(source);

    assert_eq!(
        rendered,
        format!(
            "--> {}\n4 | total = 10.5.1\n                ^\nerror: too many decimal points for float\n",
            path
        )
    );
}

#[test]
fn diagnostic_for_unexpected_continuation() {
    let source = "if a {\n  b =* c\n}\n";
    let file = fixture(source);
    let err = Lexer::open(file.path()).unwrap().tokenize().unwrap_err();

    let location = err.location().unwrap().clone();
    assert_eq!((location.line, location.column, location.end_column), (2, 5, None));
    assert_eq!(err.lex_kind(), Some(&LexErrorKind::UnexpectedContinuation("=".into())));

    let rendered = Diagnostic::from_file(err).format_plain();
    assert!(rendered.contains("2 |   b =* c\n"));
    assert!(rendered.contains("\n         ^\n"));
    assert!(rendered.ends_with("error: unexpected continuation of token '='\n"));
}

#[test]
fn open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.exm");

    let err = Lexer::open(&missing).err().expect("open should fail");
    assert!(matches!(err, ExemeError::Open { .. }));

    let rendered = Diagnostic::new(err).format_plain();
    assert!(rendered.starts_with(&format!("--> {}\n", missing.display())));
    assert!(rendered.contains("error: failed to open file"));
}

#[test]
fn invalid_utf8_is_an_io_fault() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&[b'x', b' ', 0xC3, 0x28]).unwrap();
    file.flush().unwrap();

    let err = Lexer::open(file.path()).unwrap().tokenize().unwrap_err();
    assert!(matches!(err, ExemeError::Read { .. }));
    assert_eq!(err.kind(), "I/O Error");
}
