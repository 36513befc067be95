use crate::Loaded;
use std::collections::HashSet;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Entries")]
    entries: usize,
    #[tabled(rename = "Names")]
    names: usize,
}

pub fn run(
    out: &mut impl std::io::Write,
    loaded: &Loaded,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rows: Vec<CategoryRow> = loaded
        .set
        .iter()
        .map(|(category, index)| CategoryRow {
            category: category.to_string(),
            entries: index.len(),
            names: index.iter().map(|e| e.name).collect::<HashSet<_>>().len(),
        })
        .collect();

    rows.push(CategoryRow {
        category: "total".to_string(),
        entries: loaded.set.len(),
        names: loaded.rodeo.len(),
    });

    writeln!(out, "{}", Table::new(rows))?;
    Ok(())
}
