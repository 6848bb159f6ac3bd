use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use log::info;
use rusty_shipments::dashboard::export::export_view;
use rusty_shipments::dashboard::filter::FilterCriteria;
use rusty_shipments::dashboard::filter::FilteredView;
use rusty_shipments::dashboard::records::SectionRecord;
use rusty_shipments::dashboard::summary::summarize;
use rusty_shipments::SessionStore;
use rusty_shipments::Upload;
use std::path::Path;
use std::path::PathBuf;

/// Loads a daily shipments workbook, prints its summaries and exports both sections.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Daily workbook (`.xlsx`) with pickups and deliveries sheets.
    workbook: PathBuf,

    /// Directory the section exports are written to.
    #[arg(default_value = ".")]
    output_dir: PathBuf,
}

fn print_section<R: SectionRecord>(filtered: &FilteredView<'_, R>) {
    let summary = summarize(&filtered.view);
    println!("[{}]", R::SECTION);
    println!("  records:            {}", summary.records);
    println!("  distinct DTMs:      {}", summary.distinct_groups);
    println!("  service levels:     {}", summary.distinct_service_levels);
    for (sentinel, count) in &summary.sentinels {
        println!("  {:<19} {}", format!("{}:", sentinel), count);
    }
    if let Some((first, last)) = filtered.options.date_bounds {
        println!("  dates:              {} to {}", first, last);
    }
    println!("  regions:            {}", filtered.options.regions.join(", "));
}

fn export<R: SectionRecord>(filtered: &FilteredView<'_, R>, dir: &Path) -> Result<()> {
    let timestamp = chrono::Local::now().naive_local();
    let export = export_view(&filtered.view, timestamp)?;
    let path = export.save_to(dir)?;
    println!("  exported to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let path = args.workbook.as_path();
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("workbook.xlsx");
    info!("Loading '{}' ({} bytes)", file_name, bytes.len());

    let mut store = SessionStore::default();
    let session = store
        .load(&Upload::new(file_name, bytes))
        .with_context(|| format!("Failed to load '{}'", path.display()))?;

    let overview = session.overview();
    println!("{}", file_name);
    println!("  pickups:    {} rows, {} DTMs", overview.pickup_rows, overview.pickup_groups);
    println!("  deliveries: {} rows, {} DTMs", overview.delivery_rows, overview.delivery_groups);

    let pickups = session.pickups.view(&FilterCriteria::default());
    print_section(&pickups);
    export(&pickups, &args.output_dir)?;

    let deliveries = session.deliveries.view(&FilterCriteria::default());
    print_section(&deliveries);
    export(&deliveries, &args.output_dir)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_defaults_to_current_directory() {
        let args = Args::try_parse_from(["rusty_shipments", "daily.xlsx"]).unwrap();
        assert_eq!(args.workbook, PathBuf::from("daily.xlsx"));
        assert_eq!(args.output_dir, PathBuf::from("."));

        let args = Args::try_parse_from(["rusty_shipments", "daily.xlsx", "out"]).unwrap();
        assert_eq!(args.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_workbook_is_required() {
        assert!(Args::try_parse_from(["rusty_shipments"]).is_err());
    }
}
