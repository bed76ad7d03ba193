//! Plain-text and CSV reports of a digest.

use crate::{error::Result, restriction_site::RestrictionSite};
use std::{fs, io::Write, path::Path};

fn total_line(count: usize) -> String {
    format!("Total Cleavage Sites: {count}")
}

/// One `name, position, strand` line per site followed by the total
pub fn render_text(sites: &[RestrictionSite]) -> String {
    let mut text = String::new();
    for site in sites {
        text.push_str(&site.to_string());
        text.push('\n');
    }
    text.push_str(&total_line(sites.len()));
    text.push('\n');
    text
}

pub fn write_csv<W: Write>(writer: W, sites: &[RestrictionSite]) -> Result<()> {
    write_csv_rows(writer, None, sites)
}

/// CSV with the sequence label as a leading column on every row, so reports
/// for several sequences can share one file
pub fn write_labeled_csv<W: Write>(
    writer: W,
    label: &str,
    sites: &[RestrictionSite],
) -> Result<()> {
    write_csv_rows(writer, Some(label), sites)
}

fn write_csv_rows<W: Write>(
    writer: W,
    label: Option<&str>,
    sites: &[RestrictionSite],
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_writer(writer);
    let prefix: Vec<String> = label.map(|l| l.to_string()).into_iter().collect();
    for site in sites {
        let mut row = prefix.clone();
        row.extend([
            site.enzyme_name().to_string(),
            site.position().to_string(),
            site.strand().to_string(),
        ]);
        wtr.write_record(&row)?;
    }
    let mut total = prefix;
    total.push(total_line(sites.len()));
    wtr.write_record(&total)?;
    wtr.flush()?;
    Ok(())
}

pub fn render_csv(sites: &[RestrictionSite]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, sites)?;
    // csv only emits the UTF-8 it was given
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn render_labeled_csv(label: &str, sites: &[RestrictionSite]) -> Result<String> {
    let mut buffer = Vec::new();
    write_labeled_csv(&mut buffer, label, sites)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn write_text_file<P: AsRef<Path>>(path: P, sites: &[RestrictionSite]) -> Result<()> {
    fs::write(path, render_text(sites))?;
    Ok(())
}

pub fn write_csv_file<P: AsRef<Path>>(path: P, sites: &[RestrictionSite]) -> Result<()> {
    let file = fs::File::create(path)?;
    write_csv(file, sites)
}
