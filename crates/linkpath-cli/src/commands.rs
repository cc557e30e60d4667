//! Command-line definition and execution.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use linkpath_core::model::Term;
use linkpath_graph::{parse_ntriples, AggregatingGraph};
use linkpath_query::PathProcessor;
use std::fs;
use std::path::PathBuf;

/// Query linked-data graphs with XPath-like path expressions.
#[derive(Parser, Debug)]
#[command(name = "linkpath", version, about)]
pub struct Cli {
    /// Starting resource IRI
    pub start: String,

    /// Path expression to evaluate
    pub path: String,

    /// N-Triples files used to seed the graph
    #[arg(long = "data", value_name = "FILE")]
    pub data: Vec<PathBuf>,

    /// Prefix bindings, e.g. --bind foaf=http://xmlns.com/foaf/0.1/
    #[arg(long = "bind", value_name = "PREFIX=NAMESPACE")]
    pub bind: Vec<String>,

    /// Never dereference IRIs; use only the seeded data
    #[arg(long)]
    pub offline: bool,

    /// Print the selected terms as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Emit evaluator diagnostics at debug level
    #[arg(long)]
    pub trace: bool,
}

/// Build the processor, run the selection and print the results.
pub fn run(cli: &Cli) -> Result<Vec<Term>> {
    let mut graph = if cli.offline {
        AggregatingGraph::offline()
    } else {
        AggregatingGraph::new()
    };

    for file in &cli.data {
        let body = fs::read_to_string(file)
            .with_context(|| format!("reading {}", file.display()))?;
        let triples = parse_ntriples(&body)
            .map_err(|error| anyhow!("{}: {}", file.display(), error))?;
        graph.extend(triples);
    }

    let mut processor = PathProcessor::with_graph(graph);
    for binding in &cli.bind {
        let (prefix, namespace) = binding
            .split_once('=')
            .context("bindings take the form prefix=namespace")?;
        processor.bind(prefix, namespace);
    }

    let results = processor.select_traced(&cli.start, &cli.path, cli.trace)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for term in &results {
            println!("{}", term);
        }
    }

    Ok(results)
}
