use std::path::PathBuf;

use crate::domain::dump_target::DumpTarget;

#[derive(Debug)]
pub struct GenerateDumpScriptCommand {
    pub target: DumpTarget,
    pub primary_key: Option<String>,
    pub chunk_count: usize,
    pub output_dir: PathBuf,
    pub script_path: PathBuf,
    /// 0 means the keys must come from the database.
    pub approx_max_id: i64,
}

#[derive(Debug)]
pub struct GenerateDumpScriptResult {
    pub script_path: PathBuf,
    pub chunk_count: usize,
    pub key_source: &'static str,
    pub small_table: bool,
}
