use crate::catalog::{PriceRange, SortState};
use crate::core::{AggregateVerdict, Verdict};
use crate::facets::SubjectiveAspect;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "labcatalog")]
#[command(about = "Facet, filter and sort a lab-tested product catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the facets offered for a category
    Facets {
        /// Category name or slug
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Products file; discovers contaminant facets for categories that need it
        #[arg(long)]
        products: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Filter and sort the products of a category
    Filter {
        /// Products file (JSON array); falls back to `data.products` in the config
        products: Option<PathBuf>,

        /// Category name or slug
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Overall verdicts to keep (pass, fail, not_assigned)
        #[arg(long, value_delimiter = ',')]
        verdict: Vec<Verdict>,

        /// Protein buckets, e.g. "20-22g"
        #[arg(long, value_delimiter = ',')]
        protein: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        carbs: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        fats: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        creatine: Vec<String>,

        /// Price range as MIN..MAX (either side optional)
        #[arg(long)]
        price: Option<PriceRange>,

        /// Price-per-serving range as MIN..MAX
        #[arg(long = "price-per-serving")]
        price_per_serving: Option<PriceRange>,

        /// Contaminant verdict as KEY=VERDICT (repeatable)
        #[arg(long, value_parser = parse_contaminant)]
        contaminant: Vec<(String, Verdict)>,

        /// Subjective verdict as ASPECT=VERDICT (repeatable)
        #[arg(long, value_parser = parse_subjective)]
        subjective: Vec<(SubjectiveAspect, Verdict)>,

        /// Aggregate verdicts of the basic tests section
        #[arg(long = "basic-tests", value_delimiter = ',')]
        basic_tests: Vec<AggregateVerdict>,

        /// Aggregate verdicts of the contaminant tests section
        #[arg(long = "contaminant-tests", value_delimiter = ',')]
        contaminant_tests: Vec<AggregateVerdict>,

        /// Aggregate verdicts of the review section
        #[arg(long, value_delimiter = ',')]
        review: Vec<AggregateVerdict>,

        /// Sort as FIELD[:asc|desc]
        #[arg(short, long)]
        sort: Option<SortState>,

        /// Filter state as JSON; flags are merged on top
        #[arg(long = "filters-json")]
        filters_json: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the categories present in a products file
    Categories {
        /// Products file (JSON array); falls back to `data.products` in the config
        products: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

fn split_pair(s: &str) -> Result<(&str, Verdict), String> {
    let (key, verdict) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VERDICT, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    Ok((key, verdict.parse()?))
}

fn parse_contaminant(s: &str) -> Result<(String, Verdict), String> {
    let (key, verdict) = split_pair(s)?;
    Ok((key.to_lowercase().replace(' ', "_"), verdict))
}

fn parse_subjective(s: &str) -> Result<(SubjectiveAspect, Verdict), String> {
    let (key, verdict) = split_pair(s)?;
    let aspect =
        SubjectiveAspect::parse(key).ok_or_else(|| format!("unknown review aspect: {}", key))?;
    Ok((aspect, verdict))
}
