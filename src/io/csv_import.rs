use std::path::Path;

use log::warn;

use crate::dates;
use crate::model::record::{ProjectRecord, Vacation};

/// Pick whichever separator shows up most in the header line.
/// Comma wins ties, then tab, then semicolon.
fn detect_delimiter(first_line: &str) -> u8 {
    let mut best = b',';
    let mut best_count = first_line.matches(',').count();
    for candidate in [b'\t', b';'] {
        let count = first_line.matches(candidate as char).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

/// Normalize a header to a canonical column key: lowercase, with
/// whitespace, dashes, and underscores stripped.
fn normalize_header(h: &str) -> String {
    h.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Map a normalized header to our column index:
///   0 = name, 1 = person, 2 = team, 3 = start, 4 = end,
///   5 = tentative, 6 = color, 7 = link, 8 = notes
fn header_to_col(normalized: &str) -> Option<usize> {
    match normalized {
        "name" | "project" | "projectname" | "title" => Some(0),

        "person" | "member" | "assignee" | "owner" => Some(1),

        "team" | "group" | "dept" | "department" => Some(2),

        "start" | "startdate" | "from" | "begin" | "begindate" => Some(3),

        "end" | "enddate" | "to" | "finish" | "finishdate" | "due" | "duedate" => Some(4),

        "tentative" | "draft" | "unconfirmed" | "provisional" => Some(5),

        "color" | "customcolor" | "hex" => Some(6),

        "link" | "url" | "doc" | "document" | "documenturl" => Some(7),

        "notes" | "note" | "memo" | "description" | "comment" => Some(8),

        _ => None,
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "y" | "1")
}

/// Import project records from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column
/// headers flexibly (e.g. "Project Name", "Start Date"). Rows missing a
/// name, or whose dates are unparseable or inverted, are skipped with a
/// warning. Returns `(records, skipped_count)` on success.
pub fn import_csv(path: &Path) -> Result<(Vec<ProjectRecord>, usize), String> {
    // Read the whole file to detect delimiter from the first line
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    // Parse headers and map them to column indices
    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read CSV headers: {}", e))?
        .clone();

    let col_map: Vec<Option<usize>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    let has = |col: usize| col_map.iter().any(|c| *c == Some(col));
    if !has(0) || !has(3) || !has(4) {
        let found: Vec<&str> = headers.iter().collect();
        return Err(format!(
            "CSV is missing required columns. Found headers: {:?}. \
             Need columns for: project name, start date, end date.",
            found
        ));
    }

    let mut records: Vec<ProjectRecord> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping CSV row {}: {}", i + 2, e);
                skipped += 1;
                continue;
            }
        };

        // Extract fields by mapped column positions
        let mut fields: [Option<String>; 9] = Default::default();
        for (col_idx, field) in row.iter().enumerate() {
            if let Some(Some(col)) = col_map.get(col_idx) {
                fields[*col] = Some(field.trim().to_string());
            }
        }
        let [name, person, team, start, end, tentative, color, link, notes] = fields;

        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let start = match start.as_deref().and_then(dates::parse_date) {
            Some(d) => d,
            None => {
                warn!(
                    "skipping row {}: invalid start date '{}'",
                    i + 2,
                    start.as_deref().unwrap_or("")
                );
                skipped += 1;
                continue;
            }
        };

        let end = match end.as_deref().and_then(dates::parse_date) {
            Some(d) => d,
            None => {
                warn!(
                    "skipping row {}: invalid end date '{}'",
                    i + 2,
                    end.as_deref().unwrap_or("")
                );
                skipped += 1;
                continue;
            }
        };

        if end < start {
            warn!(
                "skipping row {}: end date {} before start date {}",
                i + 2,
                end,
                start
            );
            skipped += 1;
            continue;
        }

        let mut rec = ProjectRecord::new(
            name,
            person.unwrap_or_default(),
            team.unwrap_or_default(),
            start,
            end,
        );
        rec.color_index = records.len();
        rec.tentative = tentative.as_deref().map(parse_flag).unwrap_or(false);
        rec.custom_color = color.filter(|c| !c.is_empty());
        rec.document_url = link.filter(|l| !l.is_empty());
        rec.notes = notes.filter(|n| !n.is_empty());
        records.push(rec);
    }

    if records.is_empty() && skipped > 0 {
        return Err(format!(
            "No valid records found in CSV ({} rows skipped)",
            skipped
        ));
    }
    if records.is_empty() {
        return Err("CSV file is empty or has no data rows".to_string());
    }

    Ok((records, skipped))
}

/// Import vacations from a CSV file with person/team/start/end columns;
/// an optional label column is carried through.
pub fn import_vacations_csv(path: &Path) -> Result<(Vec<Vacation>, usize), String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let first_line = content.lines().next().unwrap_or("");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(first_line))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read CSV headers: {}", e))?
        .clone();

    // Reuse the record column map; the label rides in the notes column.
    let col_map: Vec<Option<usize>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    let mut vacations = Vec::new();
    let mut skipped = 0usize;
    for (i, result) in reader.records().enumerate() {
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping CSV row {}: {}", i + 2, e);
                skipped += 1;
                continue;
            }
        };
        let mut fields: [Option<String>; 9] = Default::default();
        for (col_idx, field) in row.iter().enumerate() {
            if let Some(Some(col)) = col_map.get(col_idx) {
                fields[*col] = Some(field.trim().to_string());
            }
        }
        let [_, person, team, start, end, _, color, _, label] = fields;

        let (Some(person), Some(start), Some(end)) = (
            person.filter(|p| !p.is_empty()),
            start.as_deref().and_then(dates::parse_date),
            end.as_deref().and_then(dates::parse_date),
        ) else {
            warn!("skipping vacation row {}: missing person or dates", i + 2);
            skipped += 1;
            continue;
        };
        if end < start {
            warn!("skipping vacation row {}: inverted range", i + 2);
            skipped += 1;
            continue;
        }

        let mut vacation = Vacation::new(
            person,
            team.unwrap_or_default(),
            start,
            end,
            color.filter(|c| !c.is_empty()).unwrap_or_else(|| "#9e9e9e".to_string()),
        );
        vacation.label = label.filter(|l| !l.is_empty());
        vacations.push(vacation);
    }

    Ok((vacations, skipped))
}
