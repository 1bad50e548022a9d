use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "keyframer", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a document and validate its animation tree.
    Check(CheckArgs),
    /// Compile a document into timeline instructions (JSON).
    Compile(CompileArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Fail when the compiler records any diagnostic.
    #[arg(long)]
    strict: bool,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,
}

/// Everything one compile run needs, as read from disk.
#[derive(serde::Deserialize, Debug)]
struct Document {
    root: keyframer::ElementId,
    animation: keyframer::AnimationNode,
    /// Static query table standing in for a live element tree.
    #[serde(default)]
    queries: keyframer::StaticDriver,
    #[serde(default)]
    opts: keyframer::CompileOpts,
    #[serde(default)]
    sub_instructions: keyframer::ElementInstructionMap,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Compile(args) => cmd_compile(args),
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "keyframer=debug",
        _ => "keyframer=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_document(path: &Path) -> anyhow::Result<Document> {
    let f = File::open(path).with_context(|| format!("open document '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc: Document = serde_json::from_reader(r).with_context(|| "parse document JSON")?;
    Ok(doc)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path)?;
    doc.animation.validate()?;
    eprintln!("{}: ok", args.in_path.display());
    Ok(())
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path)?;
    doc.animation.validate()?;

    let output = keyframer::compile(
        &doc.queries,
        doc.root,
        &doc.animation,
        &doc.opts,
        Some(&doc.sub_instructions),
    );
    for error in &output.errors {
        eprintln!("warning: {error}");
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    if args.strict {
        output.into_result()?;
    }

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json.as_bytes())
                .with_context(|| format!("write output '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
