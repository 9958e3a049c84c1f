// CSV review tables.
//
// Column names are matched case-insensitively after trimming, so
// " Review_Body " and "review_body" are the same column. Columns the analysis
// doesn't use are kept as-is and written back out next to the `fake_review`
// annotation.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::models::ReviewRecord;
use crate::pipeline::FlaggedReviews;

/// Columns every input must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["review_id", "product_id", "review_body", "product_title"];

/// Annotation column added to the output.
pub const FLAG_COLUMN: &str = "fake_review";

/// A loaded review CSV: normalized headers plus the raw rows.
#[derive(Debug, Clone)]
pub struct ReviewTable {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
    id_col: usize,
    product_col: usize,
    body_col: usize,
    title_col: usize,
    /// Position of an existing `fake_review` column, overwritten on output
    flag_col: Option<usize>,
}

impl ReviewTable {
    /// Load a review table from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open review file: {}", path.display()))?;
        let table = Self::from_reader(file)
            .with_context(|| format!("Failed to load reviews from {}", path.display()))?;
        info!(
            rows = table.len(),
            columns = table.headers.len(),
            file = %path.display(),
            "Loaded review table"
        );
        Ok(table)
    }

    /// Parse a review table from any CSV source.
    ///
    /// Fails when a required column is missing (every missing column is
    /// named), when a row is malformed, or when a review id or product id is
    /// blank or a review id repeats.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .context("Failed to read CSV header row")?
            .iter()
            .map(normalize_header)
            .collect();

        let position = |name: &str| headers.iter().position(|h| h == name);
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| position(*c).is_none())
            .collect();
        if !missing.is_empty() {
            anyhow::bail!("Input is missing required columns: {}", missing.join(", "));
        }

        // Presence was checked above
        let col = |name: &str| position(name).unwrap_or_default();
        let (id_col, product_col, body_col, title_col) = (
            col("review_id"),
            col("product_id"),
            col("review_body"),
            col("product_title"),
        );
        let flag_col = position(FLAG_COLUMN);

        let mut rows = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();

        for (i, result) in rdr.records().enumerate() {
            // Line numbers are 1-based and the header is line 1
            let line = i + 2;
            let record = result.with_context(|| format!("Malformed CSV row at line {line}"))?;

            let review_id = record.get(id_col).unwrap_or("");
            if review_id.trim().is_empty() {
                anyhow::bail!("Blank review_id at line {line}");
            }
            if record.get(product_col).unwrap_or("").trim().is_empty() {
                anyhow::bail!("Blank product_id for review {review_id} at line {line}");
            }
            if !seen_ids.insert(review_id.to_string()) {
                anyhow::bail!("Duplicate review_id {review_id} at line {line}");
            }

            rows.push(record);
        }

        Ok(Self {
            headers,
            rows,
            id_col,
            product_col,
            body_col,
            title_col,
            flag_col,
        })
    }

    /// The review records, in file order.
    ///
    /// Empty cells come through as empty strings.
    pub fn records(&self) -> Vec<ReviewRecord> {
        self.rows
            .iter()
            .map(|row| {
                let field = |idx: usize| row.get(idx).unwrap_or("").to_string();
                let record = ReviewRecord {
                    review_id: field(self.id_col),
                    product_id: field(self.product_col),
                    review_body: field(self.body_col),
                    product_title: field(self.title_col),
                };
                if record.review_body.is_empty() {
                    debug!(review_id = %record.review_id, "Empty review body, treating as empty text");
                }
                record
            })
            .collect()
    }

    /// Normalized column names, in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write every row back out with a `fake_review` column set from the
    /// flagged set (`true` / `false`).
    pub fn write_annotated<W: Write>(&self, writer: W, flagged: &FlaggedReviews) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header: Vec<&str> = self.headers.iter().map(String::as_str).collect();
        if self.flag_col.is_none() {
            header.push(FLAG_COLUMN);
        }
        wtr.write_record(&header).context("Failed to write CSV header")?;

        for row in &self.rows {
            let is_flagged = flagged.contains(row.get(self.id_col).unwrap_or(""));
            let flag = if is_flagged { "true" } else { "false" };

            let mut out: Vec<&str> = row.iter().collect();
            // Short rows can't occur (csv rejects ragged input), but pad anyway
            out.resize(self.headers.len(), "");
            match self.flag_col {
                Some(idx) => out[idx] = flag,
                None => out.push(flag),
            }
            wtr.write_record(&out).context("Failed to write CSV row")?;
        }

        wtr.flush().context("Failed to flush CSV output")?;
        Ok(())
    }

    /// Write the annotated table to a file.
    pub fn save_annotated(&self, path: &Path, flagged: &FlaggedReviews) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        self.write_annotated(file, flagged)?;
        info!(file = %path.display(), flagged = flagged.len(), "Wrote annotated reviews");
        Ok(())
    }
}

/// Default output path: `results_<name>` next to the input file.
pub fn results_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "reviews.csv".to_string());
    input.with_file_name(format!("results_{name}"))
}

/// Trim, lowercase, and drop a UTF-8 byte-order mark.
fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}
