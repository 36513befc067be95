use crate::Loaded;
use dieindex_core::IndexCategory;

pub fn run(
    out: &mut impl std::io::Write,
    loaded: &Loaded,
    category: Option<IndexCategory>,
) -> Result<(), Box<dyn std::error::Error>> {
    match category {
        Some(category) => loaded.set.get(category).dump(&loaded.rodeo, out)?,
        None => loaded.set.dump(&loaded.rodeo, out)?,
    }
    Ok(())
}
