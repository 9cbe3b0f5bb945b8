use packlist_core::error::PacklistError;
use packlist_core::model::Extraction;

pub fn print(extraction: &Extraction) -> Result<(), PacklistError> {
    let json = serde_json::to_string_pretty(extraction)?;
    println!("{json}");
    Ok(())
}
