//! vSQL CLI - Compile vSQL expressions to Oracle SQL
//!
//! Usage:
//!   vsql compile --schema <schema.toml> [--select <expr>]... [--where <expr>]...
//!   vsql check <expr> [--schema <schema.toml>] [--type <datatype>]
//!   vsql rules [--format text|json] [--nodetype <nodetype>]
//!
//! Examples:
//!   vsql compile --schema person.toml --select "p.name" --where "p.age >= 18"
//!   vsql check "now() + years(3)"
//!   vsql rules --nodetype BINOP_ADD

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vsql::compile::{compile_typed, compile_valid, CompileError};
use vsql::config::{Schema, Settings};
use vsql::query::{Query, QueryError, SortDir};
use vsql::rules::{self, RuleRegistry};
use vsql::schema::Vars;
use vsql::syntax::SyntaxError;
use vsql::types::{Aggregate, DataType, NodeType};

#[derive(Parser)]
#[command(name = "vsql")]
#[command(about = "vSQL - A type-checked expression language that compiles to Oracle SQL")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a query from vSQL expressions and print its SQL
    Compile {
        /// Path to the schema file
        #[arg(short, long)]
        schema: PathBuf,

        /// Path to the settings file (searched for if not specified)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Expression to select
        #[arg(long = "select")]
        selects: Vec<String>,

        /// Aggregated expression to select, as `aggregate:expr`
        #[arg(long = "aggregate")]
        aggregates: Vec<String>,

        /// Condition for the `where` clause
        #[arg(long = "where")]
        wheres: Vec<String>,

        /// Sort expression, optionally followed by `:asc` or `:desc`
        #[arg(long = "orderby")]
        orderbys: Vec<String>,

        /// Root variable whose table is added even if nothing references it
        #[arg(long = "register")]
        registers: Vec<String>,

        #[arg(long)]
        limit: Option<u64>,

        #[arg(long)]
        offset: Option<u64>,

        /// Comment put in front of the query
        #[arg(long)]
        comment: Option<String>,
    },

    /// Type-check a single vSQL expression
    Check {
        /// The expression
        expr: String,

        /// Path to the schema file providing root variables
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Type the expression must be usable as
        #[arg(short, long = "type")]
        datatype: Option<String>,
    },

    /// List the rules of the registry
    Rules {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only list rules for this node type (e.g. BINOP_ADD)
        #[arg(short, long)]
        nodetype: Option<String>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One rule per line
    Text,
    /// JSON array of rules
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    rules::init();

    match cli.command {
        Commands::Compile {
            schema,
            config,
            selects,
            aggregates,
            wheres,
            orderbys,
            registers,
            limit,
            offset,
            comment,
        } => {
            let request = CompileRequest {
                selects,
                aggregates,
                wheres,
                orderbys,
                registers,
                limit,
                offset,
                comment,
            };
            cmd_compile(&schema, config.as_deref(), request)
        }
        Commands::Check {
            expr,
            schema,
            datatype,
        } => cmd_check(&expr, schema.as_deref(), datatype.as_deref()),
        Commands::Rules { format, nodetype } => cmd_rules(format, nodetype.as_deref()),
    }
}

struct CompileRequest {
    selects: Vec<String>,
    aggregates: Vec<String>,
    wheres: Vec<String>,
    orderbys: Vec<String>,
    registers: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    comment: Option<String>,
}

fn cmd_compile(schema: &Path, config: Option<&Path>, request: CompileRequest) -> ExitCode {
    let settings = match config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let schema = match Schema::load(schema) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading schema: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut query = schema.query();
    if let Some(comment) = &request.comment {
        query = query.with_comment(comment.clone());
    }

    match build_query(&mut query, &request) {
        Ok(()) => {
            println!("{}", settings.render.render(&query));
            ExitCode::SUCCESS
        }
        Err((expr, e)) => {
            report_error(&expr, &e);
            ExitCode::FAILURE
        }
    }
}

/// Feed the requested clauses into `query`; on failure returns the
/// offending expression with the error.
fn build_query(query: &mut Query, request: &CompileRequest) -> Result<(), (String, QueryError)> {
    for var in &request.registers {
        query.register_vsql(var).map_err(at(var))?;
    }
    for expr in &request.selects {
        query.select_vsql(expr, None, None).map_err(at(expr))?;
    }
    for spec in &request.aggregates {
        let (aggregate, expr) = match spec.split_once(':') {
            Some((name, expr)) => (Aggregate::from_str(name), expr),
            None => (Aggregate::from_str(spec), ""),
        };
        let Some(aggregate) = aggregate else {
            let e = QueryError::UnknownAggregate(spec.clone());
            return Err((spec.clone(), e));
        };
        query
            .select_vsql(expr, None, Some(aggregate))
            .map_err(at(expr))?;
    }
    for expr in &request.wheres {
        query.where_vsql(expr).map_err(at(expr))?;
    }
    for spec in &request.orderbys {
        let (expr, dir) = match spec.rsplit_once(':') {
            Some((expr, dir)) => match dir.parse::<SortDir>() {
                Ok(dir) => (expr, Some(dir)),
                Err(_) => (spec.as_str(), None),
            },
            None => (spec.as_str(), None),
        };
        query.orderby_vsql(expr, dir, None).map_err(at(expr))?;
    }
    query.limit(request.limit).offset(request.offset);
    Ok(())
}

fn at(expr: &str) -> impl FnOnce(QueryError) -> (String, QueryError) + '_ {
    move |e| (expr.to_string(), e)
}

fn cmd_check(expr: &str, schema: Option<&Path>, datatype: Option<&str>) -> ExitCode {
    let schema = match schema.map(Schema::load).transpose() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading schema: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let empty = Vars::new();
    let vars = schema.as_ref().map_or(&empty, Schema::vars);

    let result = match datatype {
        Some(name) => match DataType::from_name(name) {
            Some(required) => compile_typed(expr, vars, required),
            None => {
                eprintln!("Unknown datatype: {}", name);
                return ExitCode::FAILURE;
            }
        },
        None => compile_valid(expr, vars, None),
    };

    match result {
        Ok(ast) => {
            let datatype = ast.datatype.map_or("NULL", |dt| dt.name());
            println!("{}", datatype);
            ExitCode::SUCCESS
        }
        Err(CompileError::Syntax(errors)) => {
            report_syntax_errors(expr, &errors);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_rules(format: OutputFormat, nodetype: Option<&str>) -> ExitCode {
    let registry = RuleRegistry::global();

    let rules: Vec<_> = match nodetype {
        Some(name) => match NodeType::from_name(name) {
            Some(nodetype) => registry.rules_for(nodetype).collect(),
            None => {
                eprintln!("Unknown node type: {}", name);
                return ExitCode::FAILURE;
            }
        },
        None => registry.rules().collect(),
    };

    match format {
        OutputFormat::Text => {
            for rule in &rules {
                println!("{} {}", rule.nodetype, rule);
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&rules) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing rules: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}

fn report_error(expr: &str, error: &QueryError) {
    match error {
        QueryError::Compile(CompileError::Syntax(errors)) => report_syntax_errors(expr, errors),
        e => eprintln!("{}", e),
    }
}

/// Print syntax errors with the expression and the error location marked.
fn report_syntax_errors(expr: &str, errors: &[SyntaxError]) {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    const ID: &str = "<expr>";
    for error in errors {
        let report = Report::build(ReportKind::Error, (ID, error.span.clone()))
            .with_message("Syntax error in vSQL expression")
            .with_label(
                Label::new((ID, error.span.clone()))
                    .with_message(&error.message)
                    .with_color(Color::Red),
            )
            .finish();
        if report.eprint((ID, Source::from(expr))).is_err() {
            eprintln!("Syntax error: {}", error);
        }
    }
}
