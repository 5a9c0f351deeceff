use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::model::Plan;

/// Save a plan as pretty-printed JSON.
pub fn save_plan(plan: &Plan, path: &Path) -> Result<(), String> {
    let file =
        File::create(path).map_err(|e| format!("cannot create {}: {}", path.display(), e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, plan)
        .map_err(|e| format!("cannot write plan: {}", e))?;
    writer
        .flush()
        .map_err(|e| format!("cannot write {}: {}", path.display(), e))
}

/// Load a plan from a JSON file.
pub fn load_plan(path: &Path) -> Result<Plan, String> {
    let file = File::open(path).map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("cannot parse {}: {}", path.display(), e))
}
