//! Output writers for catalog views, facet configurations and category lists.

use crate::catalog::accessors;
use crate::cli::OutputFormat;
use crate::catalog::view_pipeline::CatalogView;
use crate::core::{Product, Verdict};
use crate::facets::resolver::{
    contaminant_options, food_options, subjective_options, verdict_options, FacetConfig,
};
use colored::*;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One row of the `categories` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub slug: String,
    pub products: usize,
}

pub trait OutputWriter {
    fn write_view(&mut self, view: &CatalogView) -> anyhow::Result<()>;
    fn write_facets(&mut self, facets: &FacetConfig) -> anyhow::Result<()>;
    fn write_categories(&mut self, categories: &[CategorySummary]) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_view(&mut self, view: &CatalogView) -> anyhow::Result<()> {
        self.write_json(view)
    }

    fn write_facets(&mut self, facets: &FacetConfig) -> anyhow::Result<()> {
        self.write_json(facets)
    }

    fn write_categories(&mut self, categories: &[CategorySummary]) -> anyhow::Result<()> {
        self.write_json(categories)
    }
}

pub struct TableWriter<W: Write> {
    writer: W,
    currency: String,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W, currency: impl Into<String>) -> Self {
        Self {
            writer,
            currency: currency.into(),
        }
    }

    fn table(headers: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic);
        let header_cells: Vec<Cell> = headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect();
        table.set_header(header_cells);
        table
    }

    fn product_row(&self, product: &Product, view: &CatalogView) -> Vec<Cell> {
        let mut row = vec![
            Cell::new(&product.product_name),
            Cell::new(&product.company),
            Cell::new(&product.category),
            verdict_cell(product.verdict.as_ref()),
            Cell::new(accessors::display_price(product, &self.currency).unwrap_or_else(|| "-".into())),
            Cell::new(
                accessors::display_price_per_serving(product, &self.currency)
                    .unwrap_or_else(|| "-".into()),
            ),
        ];
        if let Some(sort) = view.sort {
            row.push(Cell::new(
                sort.field
                    .key(product)
                    .map(|value| format!("{}", value))
                    .unwrap_or_else(|| "-".into()),
            ));
        }
        row
    }
}

fn verdict_color(verdict: &Verdict) -> Color {
    match verdict {
        Verdict::Pass => Color::Green,
        Verdict::Fail => Color::Red,
        Verdict::Neutral | Verdict::Pending => Color::Yellow,
        Verdict::NotAssigned | Verdict::Other(_) => Color::Grey,
    }
}

fn verdict_cell(verdict: Option<&Verdict>) -> Cell {
    match verdict {
        Some(verdict) => Cell::new(verdict.display_name()).fg(verdict_color(verdict)),
        None => Cell::new("-"),
    }
}

fn join<T: AsRef<str>>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn verdict_labels(verdicts: &[Verdict]) -> String {
    join(verdicts.iter().map(Verdict::display_name))
}

impl<W: Write> OutputWriter for TableWriter<W> {
    fn write_view(&mut self, view: &CatalogView) -> anyhow::Result<()> {
        let mut headers = vec!["Product", "Company", "Category", "Verdict", "Price", "Per Serving"];
        if let Some(sort) = view.sort {
            headers.push(sort.field.display_name());
        }

        let mut table = Self::table(&headers);
        for product in &view.products {
            table.add_row(self.product_row(product, view));
        }

        writeln!(self.writer, "{}", table)?;
        writeln!(self.writer, "{}", view.summary_line().bold())?;
        if view.active_filters > 0 {
            writeln!(
                self.writer,
                "{}",
                format!("{} active filter(s)", view.active_filters).dimmed()
            )?;
        }
        if let Some(sort) = view.sort {
            writeln!(
                self.writer,
                "{}",
                format!("Sorted by {} ({})", sort.field.display_name(), sort.direction.as_str()).dimmed()
            )?;
        }
        Ok(())
    }

    fn write_facets(&mut self, facets: &FacetConfig) -> anyhow::Result<()> {
        let mut table = Self::table(&["Facet", "Options"]);

        if facets.has_verdict {
            table.add_row(vec!["Verdict".to_string(), verdict_labels(&verdict_options())]);
        }
        for nutrient in &facets.nutrients {
            table.add_row(vec![
                nutrient.display_name().to_string(),
                join(nutrient.ranges().iter().map(|range| range.label)),
            ]);
        }
        if facets.has_price {
            table.add_row(vec!["Price".to_string(), "range".to_string()]);
        }
        if facets.has_price_per_serving {
            table.add_row(vec!["Price per Serving".to_string(), "range".to_string()]);
        }
        if facets.has_contaminants {
            let options = verdict_labels(&contaminant_options());
            if facets.contaminants.is_empty() {
                table.add_row(vec!["Contaminants".to_string(), "from data".to_string()]);
            }
            for key in &facets.contaminants {
                table.add_row(vec![key.clone(), options.clone()]);
            }
        }
        if facets.has_subjective {
            let options = verdict_labels(&subjective_options());
            for aspect in &facets.subjective {
                table.add_row(vec![aspect.display_name().to_string(), options.clone()]);
            }
        }
        if facets.has_food_filters {
            let options = join(food_options().iter().map(|v| v.as_str()));
            for section in crate::facets::resolver::TestSection::all() {
                table.add_row(vec![section.display_name().to_string(), options.clone()]);
            }
        }

        writeln!(
            self.writer,
            "{} {}",
            "Profile:".bold(),
            facets.profile.as_str()
        )?;
        writeln!(self.writer, "{}", table)?;
        if facets.has_sorting {
            writeln!(
                self.writer,
                "{} {}",
                "Sort by:".bold(),
                join(facets.sorting_fields.iter().map(|field| field.as_str()))
            )?;
        }
        Ok(())
    }

    fn write_categories(&mut self, categories: &[CategorySummary]) -> anyhow::Result<()> {
        let mut table = Self::table(&["Category", "Slug", "Products"]);
        for category in categories {
            table.add_row(vec![
                category.name.clone(),
                category.slug.clone(),
                category.products.to_string(),
            ]);
        }
        writeln!(self.writer, "{}", table)?;
        Ok(())
    }
}

/// Writer for `format`, targeting `output` or stdout.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
    currency: &str,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Table => Box::new(TableWriter::new(sink, currency)),
    })
}
