use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use structopt::StructOpt;

use elag::automaton::{
    elag_complementation, elag_concat, elag_determinize, elag_intersection, elag_minimize,
    AutomatonDocument, IntersectionMode, SingleGraph,
};
use elag::config::ElagConfig;
use elag::language::Language;
use elag::symbol::Symbol;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "elag",
    about = "Apply automaton operations to ELAG grammars and text automata."
)]
struct Opts {
    #[structopt(short, long, parse(from_os_str), help = "Tagset definition file")]
    tagset: PathBuf,

    #[structopt(short, long, parse(from_os_str), help = "JSON pipeline configuration")]
    config: Option<PathBuf>,

    #[structopt(
        short,
        long,
        parse(from_os_str),
        help = "Where to write the resulting automaton (default: stdout)"
    )]
    output: Option<PathBuf>,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    #[structopt(about = "Determinize an automaton")]
    Determinize {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
    },

    #[structopt(about = "Minimize a deterministic automaton")]
    Minimize {
        #[structopt(parse(from_os_str))]
        input: PathBuf,

        #[structopt(short, long, help = "Compact default transitions first when above 0")]
        level: Option<usize>,
    },

    #[structopt(about = "Intersect two deterministic automata")]
    Intersect {
        #[structopt(parse(from_os_str))]
        a: PathBuf,

        #[structopt(parse(from_os_str))]
        b: PathBuf,

        #[structopt(short, long, help = "grammar or text")]
        mode: Option<IntersectionMode>,
    },

    #[structopt(about = "Complement a deterministic automaton")]
    Complement {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
    },

    #[structopt(about = "Concatenate two automata")]
    Concat {
        #[structopt(parse(from_os_str))]
        a: PathBuf,

        #[structopt(parse(from_os_str))]
        b: PathBuf,
    },

    #[structopt(about = "Remove useless states")]
    Trim {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
    },

    #[structopt(about = "Parse grammar labels and print their symbols")]
    Label {
        #[structopt(required = true)]
        tags: Vec<String>,
    },
}

fn read_automaton(language: &mut Language, path: &Path) -> anyhow::Result<(SingleGraph, bool)> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let doc = AutomatonDocument::from_json(&json)
        .with_context(|| format!("parsing {}", path.display()))?;
    let graph = doc
        .to_graph(language)
        .with_context(|| format!("loading {}", path.display()))?;
    log::info!("{}: {} states", path.display(), graph.len());
    Ok((graph, doc.text))
}

fn write_automaton(
    language: &Language,
    graph: &SingleGraph,
    text: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let json = AutomatonDocument::from_graph(language, graph, text)?.to_json()?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            out.write_all(json.as_bytes())?;
            out.write_all(b"\n")?;
        }
    }
    eprintln!("{} states", graph.len());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::from_args();
    let config = match &opts.config {
        Some(path) => ElagConfig::from_path(path)
            .with_context(|| format!("reading configuration {}", path.display()))?,
        None => ElagConfig::default(),
    };
    let mut language = Language::from_tagset_path(&opts.tagset)
        .with_context(|| format!("reading tagset {}", opts.tagset.display()))?;
    let output = opts.output.as_deref();

    match opts.command {
        Command::Determinize { input } => {
            let (mut graph, text) = read_automaton(&mut language, &input)?;
            elag_determinize(&language, &mut graph)?;
            write_automaton(&language, &graph, text, output)
        }
        Command::Minimize { input, level } => {
            let (mut graph, text) = read_automaton(&mut language, &input)?;
            elag_minimize(&mut graph, level.unwrap_or(config.minimize_level))?;
            write_automaton(&language, &graph, text, output)
        }
        Command::Intersect { a, b, mode } => {
            let (a, text) = read_automaton(&mut language, &a)?;
            let (b, _) = read_automaton(&mut language, &b)?;
            let mode = mode.unwrap_or(config.intersection_mode);
            let mut graph = elag_intersection(&language, &a, &b, mode)?;
            if config.trim {
                graph.trim();
            }
            write_automaton(&language, &graph, text, output)
        }
        Command::Complement { input } => {
            let (mut graph, text) = read_automaton(&mut language, &input)?;
            elag_complementation(&language, &mut graph)?;
            write_automaton(&language, &graph, text, output)
        }
        Command::Concat { a, b } => {
            let (mut graph, text) = read_automaton(&mut language, &a)?;
            let (b, _) = read_automaton(&mut language, &b)?;
            elag_concat(&language, &mut graph, b)?;
            if config.trim {
                graph.trim();
            }
            write_automaton(&language, &graph, text, output)
        }
        Command::Trim { input } => {
            let (mut graph, text) = read_automaton(&mut language, &input)?;
            graph.trim();
            write_automaton(&language, &graph, text, output)
        }
        Command::Label { tags } => {
            for tag in tags {
                let symbols = Symbol::parse_grammar(&mut language, &tag)
                    .with_context(|| format!("parsing {}", tag))?;
                for symbol in symbols {
                    println!("{}\t{}", symbol.grammar_label(&language), symbol.dump(&language));
                }
            }
            Ok(())
        }
    }
}
