use crate::Loaded;
use dieindex_api::{DieArray, DieRef, DwOffset, NameReader};
use dieindex_core::{DieIndexError, IndexCategory};
use regex::RegexBuilder;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct Match {
    category: &'static str,
    #[serde(flatten)]
    die: DieRef,
}

fn print_matches(
    out: &mut impl Write,
    matches: &[(IndexCategory, DieRef)],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let rows: Vec<Match> = matches
            .iter()
            .map(|(category, die)| Match {
                category: category.as_str(),
                die: *die,
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    if matches.is_empty() {
        writeln!(out, "No matches.")?;
    }
    for (category, die) in matches {
        writeln!(out, "{:<20} {}", category, die)?;
    }
    Ok(())
}

fn tag(category: IndexCategory, dies: DieArray) -> impl Iterator<Item = (IndexCategory, DieRef)> {
    dies.into_iter().map(move |die| (category, die))
}

pub fn lookup(
    out: &mut impl Write,
    loaded: &Loaded,
    name: &str,
    category: Option<IndexCategory>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // A name that was never interned cannot be in any index.
    let Some(handle) = loaded.rodeo.lookup_name(name) else {
        return print_matches(out, &[], json);
    };

    let mut matches = Vec::new();
    for category in loaded.categories(category) {
        let dies = loaded.set.get(category).find(&loaded.rodeo, handle);
        matches.extend(tag(category, dies));
    }
    print_matches(out, &matches, json)
}

pub fn grep(
    out: &mut impl Write,
    loaded: &Loaded,
    pattern: &str,
    category: Option<IndexCategory>,
    ignore_case: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
        .map_err(DieIndexError::from)?;

    let mut matches = Vec::new();
    for category in loaded.categories(category) {
        let dies = loaded.set.get(category).find_matching(&loaded.rodeo, &regex);
        matches.extend(tag(category, dies));
    }
    print_matches(out, &matches, json)
}

pub fn unit(
    out: &mut impl Write,
    loaded: &Loaded,
    cu_offset: DwOffset,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let matches = loaded.set.find_by_cu(cu_offset);
    print_matches(out, &matches, json)
}
