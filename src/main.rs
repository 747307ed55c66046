//! Sierra CLI
//!
//! Parses a single Sierra source file and reports success or the first diagnostic.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser as _;

use sierra_syntax::{parse_file, Diagnostic, Lexer, Nonterminal, Parser, SierraError};

#[derive(clap::Parser)]
#[command(name = "sierra", version, about = "Syntax checker for the Sierra language")]
struct Cli {
    /// Source file to parse
    path: PathBuf,

    /// Show tokenization output (lexer only)
    #[arg(short, long)]
    tokens: bool,

    /// Print the parsed syntax tree
    #[arg(short, long)]
    ast: bool,

    /// Parse the whole file as a single grammar rule, e.g. `expression`
    #[arg(short, long, value_parser = parse_rule)]
    rule: Option<Nonterminal>,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(output) => print!("{}", output),
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        }
    }
}

fn parse_rule(name: &str) -> Result<Nonterminal, String> {
    Nonterminal::from_str(name).ok_or_else(|| {
        let known: Vec<&str> = Nonterminal::ALL.iter().map(|nt| nt.as_str()).collect();
        format!("unknown rule '{}' (expected one of: {})", name, known.join(", "))
    })
}

fn run(cli: &Cli) -> Result<String, String> {
    let source = read_source(&cli.path)?;
    let filename = cli.path.display().to_string();

    if cli.tokens {
        render_tokens(&source, &filename)
    } else if let Some(rule) = cli.rule {
        render_fragment(&source, &filename, rule)
    } else {
        render_check(&source, &filename, cli.ast)
    }
}

fn read_source(path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))
}

/// Parse a whole file into either a success line or the rendered diagnostic
///
/// With `print_ast`, each syntax unit is listed first, prefixed by its position.
fn render_check(source: &str, filename: &str, print_ast: bool) -> Result<String, String> {
    let file = parse_file(source, Some(filename))
        .map_err(|e| Diagnostic::with_source(&e, source).to_string())?;

    let mut output = String::new();
    if print_ast {
        for unit in &file.units {
            let location = unit.location();
            let _ = writeln!(output, "{}:{}  {}", location.line, location.column, unit);
        }
    }

    let _ = writeln!(output, "ok: {} ({} syntax units)", filename, file.units.len());
    Ok(output)
}

/// Parse a whole file as one nonterminal and show the resulting node
fn render_fragment(source: &str, filename: &str, rule: Nonterminal) -> Result<String, String> {
    let render_error = |e: SierraError| Diagnostic::with_source(&e, source).to_string();

    let tokens = Lexer::new(source, Some(filename))
        .tokenize()
        .map_err(render_error)?;
    let node = Parser::new(tokens)
        .parse_fragment(rule)
        .map_err(render_error)?;

    Ok(format!("{}\nok: {} ({})\n", node, filename, rule))
}

/// Show tokens from lexing a file
fn render_tokens(source: &str, filename: &str) -> Result<String, String> {
    let tokens = Lexer::new(source, Some(filename))
        .tokenize()
        .map_err(|e| Diagnostic::with_source(&e, source).to_string())?;

    let mut output = String::new();
    let _ = writeln!(output, "Tokens for '{}':", filename);
    let _ = writeln!(output, "{}", "=".repeat(60));

    for (i, token) in tokens.iter().enumerate() {
        let _ = writeln!(
            output,
            "{:4}: {:8} {:20} | {:?}",
            i,
            format!("{}:{}", token.location.line, token.location.column),
            format!("{:?}", token.token_type),
            token.lexeme
        );
    }

    let _ = writeln!(output, "{}", "=".repeat(60));
    let _ = writeln!(output, "Total tokens: {}", tokens.len());

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_reports_unit_count() {
        let output = render_check("program Hello;\nuse a.b;\n", "hello.sierra", false).unwrap();
        assert_eq!(output, "ok: hello.sierra (2 syntax units)\n");
    }

    #[test]
    fn test_ast_dump_prefixes_unit_positions() {
        let source = "program Hello;\n  type X = 1..2;\n";
        let output = render_check(source, "hello.sierra", true).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "1:1  ProgramStatement(Hello)");
        assert_eq!(
            lines[1],
            "2:3  TypeDefinition(X, Range(NumberLiteral(1), NumberLiteral(2)))"
        );
        assert_eq!(lines[2], "ok: hello.sierra (2 syntax units)");
    }

    #[test]
    fn test_check_renders_diagnostic() {
        let message = render_check("use a.b", "broken.sierra", false).unwrap_err();
        assert!(message.contains("Structural Error"));
        assert!(message.contains("Expected ';' after use path"));
        assert!(message.contains("broken.sierra:1:8"));
    }

    #[test]
    fn test_tokens_table() {
        let output = render_tokens("use a;", "t.sierra").unwrap();
        assert!(output.starts_with("Tokens for 't.sierra':\n"));
        assert!(output.contains("Keyword(Use)"));
        assert!(output.contains("Semicolon"));
        // use, a, ;, and the end-of-input marker
        assert!(output.ends_with("Total tokens: 4\n"));
    }

    #[test]
    fn test_tokens_reports_lex_error() {
        let message = render_tokens("use a$b;", "t.sierra").unwrap_err();
        assert!(message.contains("Lex Error"));
    }

    #[test]
    fn test_fragment_uses_named_rule() {
        let output = render_fragment("1..2..3", "e.sierra", Nonterminal::Expression).unwrap();
        assert_eq!(
            output,
            "Range(Range(NumberLiteral(1), NumberLiteral(2)), NumberLiteral(3))\n\
             ok: e.sierra (expression)\n"
        );

        let message = render_fragment("1 2", "e.sierra", Nonterminal::Expression).unwrap_err();
        assert!(message.contains("Syntax Error"));
    }

    #[test]
    fn test_rule_names_are_validated() {
        assert_eq!(parse_rule("parameter_list"), Ok(Nonterminal::ParameterList));
        let message = parse_rule("visibility").unwrap_err();
        assert!(message.contains("unknown rule 'visibility'"));
        assert!(message.contains("qualified_identifier"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let message = read_source(Path::new("does/not/exist.sierra")).unwrap_err();
        assert!(message.starts_with("Failed to read file 'does/not/exist.sierra'"));
    }
}
