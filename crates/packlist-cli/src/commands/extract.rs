use std::path::PathBuf;

use packlist_core::error::PacklistError;
use packlist_core::extraction::pdftotext::PdftotextExtractor;
use packlist_core::model::Factory;
use packlist_core::structured::{ApiCredential, GeminiExtractor, StructuredExtractor};
use packlist_core::{extract_documents, InputDocument};

use crate::output;

pub fn run(
    factory: &str,
    files: Vec<PathBuf>,
    output_format: &str,
    out: Option<PathBuf>,
    summary: bool,
    ai_keys: Vec<String>,
    ai_model: &str,
) -> Result<(), PacklistError> {
    let factory = Factory::from_str_loose(factory)
        .ok_or_else(|| PacklistError::UnknownFactory(factory.to_string()))?;

    let mut documents = Vec::new();
    for path in &files {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        documents.push(InputDocument { name, bytes });
    }

    let extractor = PdftotextExtractor::new();
    let gemini = if ai_keys.is_empty() {
        None
    } else {
        Some(GeminiExtractor::new(
            ai_keys
                .into_iter()
                .map(|api_key| ApiCredential {
                    model: ai_model.to_string(),
                    api_key,
                })
                .collect(),
        ))
    };
    let structured = gemini.as_ref().map(|g| g as &dyn StructuredExtractor);

    let extraction = extract_documents(&documents, factory, &extractor, structured)?;

    for w in &extraction.warnings {
        eprintln!("warning: {}: {}", w.file, w.reason);
    }
    if !extraction.skipped_rows.is_empty() {
        eprintln!(
            "{} row(s) dropped during normalization",
            extraction.skipped_rows.len()
        );
    }

    if extraction.records.is_empty() {
        eprintln!("No data found. Check the factory selection and the input files.");
        std::process::exit(1);
    }

    match output_format {
        "json" => output::json::print(&extraction)?,
        _ => output::table::print_records(&extraction.records),
    }

    if summary {
        let totals = packlist_core::summary::summarize(&extraction.records);
        output::table::print_summary(&totals);
    }

    if let Some(path) = out {
        let bytes = packlist_core::export::to_xlsx(&extraction.records)?;
        std::fs::write(&path, bytes)?;
        eprintln!(
            "{} record(s) written to {}",
            extraction.records.len(),
            path.display()
        );
    }

    Ok(())
}
