use crate::catalog::FsCatalogStore;
use crate::config::Config;
use crate::core::{
    workbook_files, CatalogOutcome, ExportOutcome, Exporter, ImportReport, Importer,
};
use crate::error::{MessageError, MessageResult};
use crate::excel::XlsxStore;
use crate::types::{SelectPolicy, SkipReason};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Check that the configuration file and the Excel directory exist, then
/// load the configuration
pub fn check_args(config_file: &Path, excel_dir: &Path) -> MessageResult<Config> {
    if !config_file.is_file() {
        return Err(MessageError::MissingPath(format!(
            "The configuration file does not exist: {}",
            config_file.display()
        )));
    }
    if !excel_dir.is_dir() {
        return Err(MessageError::MissingPath(format!(
            "The Excel directory does not exist: {}",
            excel_dir.display()
        )));
    }
    Config::load(config_file)
}

/// Execute the export command
pub fn export(
    config_file: PathBuf,
    excel_dir: PathBuf,
    policy: SelectPolicy,
    verbose: bool,
) -> MessageResult<()> {
    let config = check_args(&config_file, &excel_dir)?;

    println!("{}", "📤 Excel Message - Export".bold().green());
    println!("   Config:    {}", config_file.display());
    println!("   Output:    {}", excel_dir.display());
    println!("   Messages:  {}", policy.to_string().bright_yellow());
    if verbose {
        println!("   Source:    {}", config.source_language);
        println!("   Languages: {}", config.languages.join(", "));
        println!("   Format:    {}", config.format);
    }
    println!();

    let catalogs = FsCatalogStore::new(&config.message_path, config.format);
    let exporter = Exporter::new(&config, policy);

    let scan = exporter.collect(&catalogs)?;
    for catalog in &scan.catalogs {
        print!("{}", format!("Reading {} ... ", catalog.path.display()).green());
        if verbose {
            print!("{} selected ", catalog.selected);
        }
        println!("{}", "Done.".green());
    }

    match exporter.write(&scan.batch, &XlsxStore, &excel_dir)? {
        ExportOutcome::NothingToExport => {
            println!("{}", "No new translations found".green());
        }
        ExportOutcome::Written(files) => {
            for file in &files {
                println!(
                    "{}",
                    format!(
                        "Writing Excel file for {} to {} ... Done.",
                        file.language,
                        file.path.display()
                    )
                    .green()
                );
                if verbose {
                    println!("   {} sheets, {} messages", file.sheets, file.rows);
                }
            }
            println!();
            println!(
                "{}",
                format!("✅ Exported {} Excel file(s)", files.len()).bold().green()
            );
        }
    }

    Ok(())
}

/// Execute the import command
pub fn import(
    config_file: PathBuf,
    excel_dir: PathBuf,
    extension: String,
    dry_run: bool,
    verbose: bool,
) -> MessageResult<()> {
    let config = check_args(&config_file, &excel_dir)?;
    let extension = extension.trim_start_matches('.').to_string();

    println!("{}", "📥 Excel Message - Import".bold().green());
    println!("   Config: {}", config_file.display());
    println!("   Input:  {}", excel_dir.display());
    if verbose {
        println!("   Files:  *.{}", extension);
        println!("   Format: {}", config.format);
    }
    println!();

    if dry_run {
        println!(
            "{}",
            "📋 DRY RUN MODE - No changes will be written\n".yellow()
        );
    }

    let files = workbook_files(&excel_dir, &extension)?;
    if verbose {
        for file in &files {
            println!("   Reading {}", file.display());
        }
    }

    let catalogs = FsCatalogStore::new(&config.message_path, config.format);
    let report = Importer::new()
        .dry_run(dry_run)
        .run(&XlsxStore, &files, &catalogs)?;

    print_report(&report, verbose);
    Ok(())
}

fn print_report(report: &ImportReport, verbose: bool) {
    let mut current_language: Option<&str> = None;

    for outcome in &report.outcomes {
        let language = match outcome {
            CatalogOutcome::Updated(update) => update.language.as_str(),
            CatalogOutcome::Missing { skip, .. } => skip.language.as_str(),
        };
        if current_language != Some(language) {
            if current_language.is_some() {
                println!();
            }
            println!(
                "{}",
                format!("Updating translations for {}", language).green()
            );
            current_language = Some(language);
        }

        match outcome {
            CatalogOutcome::Updated(update) => {
                println!("Updating {}", update.path.display());
                for skip in &update.skips {
                    let label = match skip.reason {
                        SkipReason::Exists => "Skipping (exists): ",
                        _ => "Skipping (removed): ",
                    };
                    println!(
                        "{}{}",
                        label.yellow(),
                        skip.source.as_deref().unwrap_or_default()
                    );
                }
                if verbose {
                    println!("   {} message(s) translated", update.updated);
                }
            }
            CatalogOutcome::Missing { skip, path } => println!(
                "{}",
                format!(
                    "Category '{}' not found for language '{}' ({}) - Skipping",
                    skip.category,
                    skip.language,
                    path.display()
                )
                .red()
            ),
        }
    }

    println!();
    let summary = format!(
        "{} message(s) translated in {} file(s); skipped {} removed, {} existing, {} missing categories",
        report.updated_count(),
        report.updates().count(),
        report.skipped(SkipReason::Removed),
        report.skipped(SkipReason::Exists),
        report.skipped(SkipReason::MissingCategory),
    );
    if report.dry_run {
        println!("{}", format!("📋 Dry run: {}", summary).yellow());
    } else {
        println!("{}", format!("✅ {}", summary).bold().green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_args_missing_config() {
        let temp = TempDir::new().unwrap();
        let err = check_args(&temp.path().join("nope.yaml"), temp.path()).unwrap_err();
        assert!(err.to_string().contains("configuration file does not exist"));
    }

    #[test]
    fn test_check_args_missing_dir() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.yaml");
        std::fs::write(&config, "message_path: .\nlanguages: [de]\n").unwrap();

        let err = check_args(&config, &temp.path().join("excel")).unwrap_err();
        assert!(matches!(err, MessageError::MissingPath(_)));
    }

    #[test]
    fn test_check_args_loads_config() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.yaml");
        std::fs::write(&config, "message_path: .\nlanguages: [de]\n").unwrap();

        let loaded = check_args(&config, temp.path()).unwrap();
        assert_eq!(loaded.languages, vec!["de"]);
    }
}
