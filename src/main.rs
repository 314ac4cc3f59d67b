use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use foo_syntax::{GrammarProfile, Lexer, Node, NodeKind, ParserConfig, SyntaxTree};

#[derive(Parser)]
#[command(name = "foo-syntax")]
#[command(author, version, about = "Parser front end for the Foo language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Grammar profile to parse with
    #[arg(long, value_enum, global = true, default_value = "full")]
    profile: ProfileArg,

    /// Maximum nesting depth
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    /// The complete grammar (default)
    #[value(name = "full")]
    Full,
    /// The reduced core grammar
    #[value(name = "core")]
    Core,
}

impl From<ProfileArg> for GrammarProfile {
    fn from(profile: ProfileArg) -> Self {
        match profile {
            ProfileArg::Full => GrammarProfile::Full,
            ProfileArg::Core => GrammarProfile::Core,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// S-expression (default)
    #[value(name = "sexp")]
    Sexp,
    /// JSON dump of the full tree
    #[value(name = "json")]
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// The source file to tokenize
        input: PathBuf,
    },

    /// Print the concrete syntax tree of a source file
    Parse {
        /// The source file to parse
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "sexp")]
        format: OutputFormat,
    },

    /// Check a source file for syntax errors
    Check {
        /// The source file to check
        input: PathBuf,
    },

    /// List the top-level declarations of a source file
    Outline {
        /// The source file to outline
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let mut config = ParserConfig::default().with_profile(cli.profile.into());
    if let Some(max_depth) = cli.max_depth {
        config = config.with_max_depth(max_depth);
    }

    let result = match cli.command {
        Commands::Tokens { input } => tokens(input),
        Commands::Parse { input, format } => parse(input, format, config),
        Commands::Check { input } => check(input, config),
        Commands::Outline { input } => outline(input, config),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// A source file loaded for diagnostics
struct SourceState {
    source: String,
    files: SimpleFiles<String, String>,
    file_id: usize,
}

impl SourceState {
    fn new(source_file: PathBuf) -> Result<Self> {
        let source = fs::read_to_string(&source_file)
            .with_context(|| format!("Failed to read source file: {:?}", source_file))?;

        let mut files = SimpleFiles::new();
        let file_id = files.add(source_file.display().to_string(), source.clone());

        Ok(Self {
            source,
            files,
            file_id,
        })
    }

    fn parse(&self, config: ParserConfig) -> SyntaxTree {
        SyntaxTree::parse_with(self.source.clone(), config)
    }

    fn report_error(&self, diagnostic: &Diagnostic<usize>) -> Result<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, diagnostic)?;
        Ok(())
    }
}

fn tokens(input: PathBuf) -> Result<()> {
    log::info!("Tokenizing {:?}", input);

    let state = SourceState::new(input)?;
    for (i, token) in Lexer::new(&state.source).enumerate() {
        println!("{:4}: {}", i, token);
    }
    Ok(())
}

fn parse(input: PathBuf, format: OutputFormat, config: ParserConfig) -> Result<()> {
    log::info!("Parsing {:?} ({} profile)", input, config.profile);

    let state = SourceState::new(input)?;
    let tree = state.parse(config);

    match format {
        OutputFormat::Sexp => println!("{}", tree.to_sexp()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tree.root())?),
    }

    if tree.has_errors() {
        log::warn!("{} syntax errors", tree.errors().len());
    }
    Ok(())
}

fn check(input: PathBuf, config: ParserConfig) -> Result<()> {
    log::info!("Checking {:?}", input);

    let state = SourceState::new(input)?;
    let tree = state.parse(config);
    let errors = tree.errors();

    for error in &errors {
        state.report_error(&error.to_diagnostic(state.file_id))?;
    }

    if !errors.is_empty() {
        anyhow::bail!("Found {} syntax errors", errors.len());
    }

    println!("{}: No errors found", "success".green().bold());
    Ok(())
}

fn outline(input: PathBuf, config: ParserConfig) -> Result<()> {
    log::info!("Outlining {:?}", input);

    let state = SourceState::new(input)?;
    let tree = state.parse(config);
    let index = tree.line_index();

    for statement in tree.root().child_nodes() {
        let Some((label, name)) = describe_declaration(statement) else {
            continue;
        };
        let position = index.line_col(statement.span().start);
        println!(
            "{:>4}:{:<3} {} {}",
            position.line + 1,
            position.column + 1,
            label.cyan(),
            name
        );
    }
    Ok(())
}

/// Text of the leaf node stored under `field`
fn leaf_text<'a>(node: &'a Node, field: &str) -> Option<&'a str> {
    node.field_node(field)
        .and_then(|leaf| leaf.field_token("token"))
        .map(|token| token.text.as_str())
}

/// Label and name of a top-level declaration
fn describe_declaration(node: &Node) -> Option<(String, String)> {
    let name = || leaf_text(node, "name").unwrap_or("?").to_string();
    let described = match node.kind() {
        NodeKind::VariableDecl => {
            let names: Vec<_> = node
                .field_nodes("name")
                .filter_map(|name| name.field_token("token"))
                .map(|token| token.text.as_str())
                .collect();
            ("let".to_string(), names.join(", "))
        }
        NodeKind::ConstantDecl => ("const".to_string(), name()),
        NodeKind::FunctionDecl => ("fn".to_string(), name()),
        NodeKind::StructDecl => ("struct".to_string(), name()),
        NodeKind::EnumDecl => ("enum".to_string(), name()),
        NodeKind::InterfaceDecl => ("interface".to_string(), name()),
        NodeKind::MacroDecl => ("macro".to_string(), name()),
        NodeKind::ImplDecl => (
            "impl".to_string(),
            format!(
                "{} for {}",
                leaf_text(node, "interface").unwrap_or("?"),
                leaf_text(node, "type").unwrap_or("?")
            ),
        ),
        NodeKind::ExtensionDecl => (
            "extension".to_string(),
            leaf_text(node, "type").unwrap_or("?").to_string(),
        ),
        NodeKind::Import => (
            "import".to_string(),
            leaf_text(node, "path").unwrap_or("?").to_string(),
        ),
        NodeKind::Export => {
            let (label, name) = describe_declaration(node.field_node("declaration")?)?;
            (format!("export {}", label), name)
        }
        _ => return None,
    };
    Some(described)
}
