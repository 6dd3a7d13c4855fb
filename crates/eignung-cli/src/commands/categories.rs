//! The `eignung categories` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use eignung_core::model::{Category, Composite};
use eignung_core::registry::Registry;

pub fn execute() -> Result<()> {
    let registry = Registry::standard();

    let mut areas = Table::new();
    areas.set_header(vec!["Bereich", "Name", "Fragetypen"]);
    for category in Category::ALL {
        let kinds: Vec<String> = registry
            .kinds(category)
            .iter()
            .map(|k| k.to_string())
            .collect();
        areas.add_row(vec![
            Cell::new(category.slug()),
            Cell::new(category.label()),
            Cell::new(kinds.join(", ")),
        ]);
    }
    println!("{areas}");

    let mut composites = Table::new();
    composites.set_header(vec!["Zusammenstellung", "Name", "Bereiche"]);
    for composite in Composite::ALL {
        let slugs: Vec<&str> = composite.areas().iter().map(|c| c.slug()).collect();
        composites.add_row(vec![
            Cell::new(composite.slug()),
            Cell::new(composite.label()),
            Cell::new(slugs.join(", ")),
        ]);
    }
    println!("\n{composites}");

    Ok(())
}
