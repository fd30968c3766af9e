use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use logicrs::ast::TreePrinter;
use logicrs::compiler::{Analysis, CompileOptions, Compiler};
use logicrs::minimizer::CoverStrategy;
use logicrs::netlist::Netlist;

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    None,
}

impl LogLevel {
    fn to_trace(&self) -> Option<tracing::Level> {
        Some(match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::None => return None,
        })
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["expression", "minterms", "combined"])))]
struct Cli {
    /// Boolean expression over the inputs A..F, e.g. "A(B + C')"
    #[arg(short, long)]
    expression: Option<String>,

    /// Comma-separated minterms (0..63) to recover an equation from
    #[arg(short, long, value_name = "0,1,...")]
    minterms: Option<String>,

    /// Labelled channel compiled into one shared netlist. Repeat up to
    /// four times.
    #[arg(short, long, value_name = "LABEL=EXPRESSION", value_parser = parse_channel)]
    combined: Vec<(String, String)>,

    /// Name of the output node.
    #[arg(short, long, default_value = "X")]
    label: String,

    /// How prime implicants are reduced before rendering.
    #[arg(long, value_enum, default_value_t = CoverStrategy::AllPrimes)]
    cover: CoverStrategy,

    /// Print the truth table of the compiled function.
    #[arg(short, long)]
    truth_table: bool,

    /// Print the gate tree of the parsed expression.
    #[arg(short, long)]
    print_tree: bool,

    /// Print the whole analysis as JSON instead of plain text.
    #[arg(long)]
    json: bool,

    /// Where to store the netlist as JSON elements
    #[arg(long, value_name = "FILE.json")]
    netlist_json_path: Option<String>,

    /// Where to store the DOT graph of the netlist
    #[arg(long, value_name = "FILE.dot")]
    netlist_dot_path: Option<String>,

    /// Verbosity level. See `tracing::Level` for more information.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    verbosity: LogLevel,
}

fn parse_channel(channel: &str) -> Result<(String, String), String> {
    match channel.split_once('=') {
        Some((label, expression)) if !label.trim().is_empty() => {
            Ok((label.trim().to_owned(), expression.to_owned()))
        }
        _ => Err(format!("expected LABEL=EXPRESSION, got '{channel}'")),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if let Some(level) = args.verbosity.to_trace() {
        tracing_subscriber::fmt().with_max_level(level).init();
    }

    let options = CompileOptions::builder().cover(args.cover).build();
    let compiler = Compiler::new(options);

    if !args.combined.is_empty() {
        let channels = args
            .combined
            .iter()
            .map(|(label, expression)| (label.as_str(), expression.as_str()))
            .collect::<Vec<_>>();
        let combined = compiler.compile_combined(&channels)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&combined)?);
        } else {
            println!("{combined}");
        }

        return write_netlist(&args, "combined", &combined.netlist);
    }

    let analysis = match (&args.expression, &args.minterms) {
        (Some(expression), _) => compiler.compile(&args.label, expression)?,
        (None, Some(minterms)) => compiler.compile_minterms(&args.label, minterms)?,
        (None, None) => unreachable!("clap requires one of the inputs"),
    };

    print_analysis(&args, &analysis)?;
    write_netlist(&args, &analysis.label, &analysis.netlist)
}

fn print_analysis(args: &Cli, analysis: &Analysis) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
    } else {
        println!("{analysis}");
    }

    if args.print_tree {
        match &analysis.tree {
            Some(tree) => print!("{}", TreePrinter(tree)),
            None => println!("{} is constant and has no gates", analysis.label),
        }
    }

    if args.truth_table {
        println!("{}", analysis.truth_table());
    }

    Ok(())
}

fn write_netlist(args: &Cli, name: &str, netlist: &Netlist) -> Result<()> {
    write_to_file(
        args.netlist_json_path.as_deref(),
        |writer: &mut dyn std::io::Write| {
            serde_json::to_writer(&mut *writer, netlist)?;
            writer.flush()?;
            Ok(())
        },
    )?;

    write_to_file(
        args.netlist_dot_path.as_deref(),
        |writer: &mut dyn std::io::Write| {
            netlist.draw(name, writer).map_err(anyhow::Error::from)
        },
    )
}

fn write_to_file(
    path: Option<&str>,
    writer: impl Fn(&mut dyn std::io::Write) -> Result<()>,
) -> Result<()> {
    if let Some(path) = path {
        let f = File::create(path).with_context(|| format!("could not create '{path}'"))?;
        let mut b = BufWriter::new(f);
        writer(&mut b as &mut dyn std::io::Write)?;
    };

    Ok(())
}
