use crate::dates;
use crate::model::grouped::GroupedProject;
use std::path::Path;

/// Export grouped projects to a semicolon-delimited CSV summary.
///
/// Columns: Project ; Members ; Start Date ; End Date ; Tentative
/// Dates are formatted as YYYY-MM-DD. Returns the number of rows written.
pub fn export_csv(projects: &[GroupedProject], path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    // Write header
    wtr.write_record(["Project", "Members", "Start Date", "End Date", "Tentative"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    // Write each grouped project
    for project in projects {
        let members = project
            .members
            .iter()
            .map(|m| format!("{} ({})", m.person, m.team))
            .collect::<Vec<_>>()
            .join(", ");
        wtr.write_record([
            project.name.as_str(),
            members.as_str(),
            dates::format_date(project.start).as_str(),
            dates::format_date(project.end).as_str(),
            if project.tentative { "yes" } else { "no" },
        ])
        .map_err(|e| format!("Failed to write project '{}': {}", project.name, e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(projects.len())
}
