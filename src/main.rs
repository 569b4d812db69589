use anyhow::Result;
use clap::Parser;
use labcatalog::cli::{Cli, Commands};
use labcatalog::commands::{self, FilterConfig};
use labcatalog::facets::{Nutrient, TestSection};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "labcatalog=warn",
        1 => "labcatalog=info",
        2 => "labcatalog=debug",
        _ => "labcatalog=trace",
    };
    // RUST_LOG wins over -v
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Facets {
            category,
            products,
            format,
            output,
        } => commands::show_facets(&category, products, format, output),
        Commands::Filter {
            products,
            category,
            verdict,
            protein,
            carbs,
            fats,
            creatine,
            price,
            price_per_serving,
            contaminant,
            subjective,
            basic_tests,
            contaminant_tests,
            review,
            sort,
            filters_json,
            format,
            output,
        } => commands::run_filter(FilterConfig {
            products,
            category,
            filters_json,
            verdicts: verdict,
            nutrients: vec![
                (Nutrient::Protein, protein),
                (Nutrient::Carbs, carbs),
                (Nutrient::Fats, fats),
                (Nutrient::Creatine, creatine),
            ],
            price,
            price_per_serving,
            contaminants: contaminant,
            subjective,
            sections: vec![
                (TestSection::BasicTests, basic_tests),
                (TestSection::ContaminantTests, contaminant_tests),
                (TestSection::Review, review),
            ],
            sort,
            format,
            output,
        }),
        Commands::Categories {
            products,
            format,
            output,
        } => commands::list_categories(products, format, output),
        Commands::Init { force } => commands::init::init_config(force),
    }
}
