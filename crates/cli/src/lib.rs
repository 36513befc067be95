mod dump;
mod query;
mod stats;

use clap::{Parser, Subcommand};
use dieindex_api::DwOffset;
use dieindex_core::ingest::{UnitRecord, load_units};
use dieindex_core::{IndexBuilder, IndexCategory, IndexConfig, IndexSet};
use lasso::ThreadedRodeo;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "dieindex",
    version,
    about = "Name lookups over debug information entries",
    long_about = "Builds name → DIE indexes from per-compile-unit DIE records (JSON) and answers \
                  exact-name, regular-expression and compile-unit queries against them."
)]
pub struct Cli {
    /// JSON file holding an array of compile units and their DIEs
    #[arg(long, global = true, value_name = "FILE", default_value = "units.json")]
    pub input: PathBuf,

    /// Worker threads used to index compile units (0 = one per core)
    #[arg(long, global = true, default_value_t = 0)]
    pub threads: usize,

    /// Keep spare index capacity after finalizing
    #[arg(long, global = true)]
    pub no_shrink: bool,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find DIEs whose name is exactly NAME
    Lookup {
        #[arg(value_name = "NAME")]
        name: String,
        /// Restrict the search to one index category
        #[arg(short, long, value_parser = parse_category)]
        category: Option<IndexCategory>,
        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find DIEs whose name matches a regular expression
    Grep {
        #[arg(value_name = "PATTERN")]
        pattern: String,
        #[arg(short, long, value_parser = parse_category)]
        category: Option<IndexCategory>,
        #[arg(short = 'i', long)]
        ignore_case: bool,
        #[arg(long)]
        json: bool,
    },
    /// List every indexed DIE owned by one compile unit
    Unit {
        /// Compile unit offset, decimal or 0x-prefixed hex
        #[arg(value_name = "CU_OFFSET", value_parser = parse_offset)]
        cu_offset: DwOffset,
        #[arg(long)]
        json: bool,
    },
    /// Print the raw index contents
    Dump {
        #[arg(short, long, value_parser = parse_category)]
        category: Option<IndexCategory>,
    },
    /// Show entry counts per index category
    Stats,
}

/// Interned names plus the finalized indexes built from them.
pub(crate) struct Loaded {
    pub rodeo: ThreadedRodeo,
    pub set: IndexSet,
}

impl Loaded {
    pub fn from_units(units: &[UnitRecord], config: IndexConfig) -> dieindex_core::Result<Self> {
        let rodeo = ThreadedRodeo::new();
        let set = IndexBuilder::new(config, &rodeo).build(units)?;
        Ok(Self { rodeo, set })
    }

    /// The selected category, or all of them.
    pub fn categories(&self, only: Option<IndexCategory>) -> Vec<IndexCategory> {
        match only {
            Some(category) => vec![category],
            None => IndexCategory::ALL.to_vec(),
        }
    }
}

pub(crate) fn load(input: &Path, config: IndexConfig) -> dieindex_core::Result<Loaded> {
    let units = load_units(input)?;
    let loaded = Loaded::from_units(&units, config)?;
    info!(
        input = %input.display(),
        names = loaded.rodeo.len(),
        entries = loaded.set.len(),
        "index ready"
    );
    Ok(loaded)
}

pub fn parse_category(s: &str) -> Result<IndexCategory, String> {
    s.parse::<IndexCategory>().map_err(|e| e.to_string())
}

pub fn parse_offset(s: &str) -> Result<DwOffset, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => DwOffset::from_str_radix(hex, 16),
        None => s.parse::<DwOffset>(),
    };
    parsed.map_err(|e| format!("invalid offset '{}': {}", s, e))
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = dieindex_core::logging::init_logging("cli", cli.verbose);

    let config = IndexConfig {
        threads: cli.threads,
        shrink_to_fit: !cli.no_shrink,
    };
    let loaded = load(&cli.input, config)?;
    let mut out = BufWriter::new(std::io::stdout().lock());

    match cli.command {
        Commands::Lookup {
            name,
            category,
            json,
        } => query::lookup(&mut out, &loaded, &name, category, json)?,
        Commands::Grep {
            pattern,
            category,
            ignore_case,
            json,
        } => query::grep(&mut out, &loaded, &pattern, category, ignore_case, json)?,
        Commands::Unit { cu_offset, json } => query::unit(&mut out, &loaded, cu_offset, json)?,
        Commands::Dump { category } => dump::run(&mut out, &loaded, category)?,
        Commands::Stats => stats::run(&mut out, &loaded)?,
    }
    out.flush()?;
    Ok(())
}

/// Two compile units covering every non-empty category except namespaces.
#[cfg(test)]
pub(crate) fn sample_loaded() -> Loaded {
    use dieindex_core::ingest::{DieKind, DieRecord};

    let units = vec![
        UnitRecord {
            offset: 0,
            dies: vec![
                DieRecord::new(0x10, DieKind::Function, "foo"),
                DieRecord::new(0x20, DieKind::Function, "Bar").with_linkage_name("_Z3Barv"),
                DieRecord::new(0x30, DieKind::Type, "Point"),
            ],
        },
        UnitRecord {
            offset: 0x100,
            dies: vec![
                DieRecord::new(0x110, DieKind::Function, "foo"),
                DieRecord::new(0x120, DieKind::Method, "push"),
                DieRecord::new(0x130, DieKind::Variable, "FOO_MAX"),
            ],
        },
    ];
    Loaded::from_units(&units, IndexConfig::default()).unwrap()
}
