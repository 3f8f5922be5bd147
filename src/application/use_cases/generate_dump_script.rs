use anyhow::Result;

use crate::{
    application::{
        commands::{GenerateDumpScriptCommand, GenerateDumpScriptResult},
        key_selection::{acquire_keys, resolve_primary_key},
        ports::{KeySource, PrimaryKeyLookup},
    },
    domain::chunk_plan::ChunkPlanner,
    infrastructure::{
        mysqldump_template::MysqldumpScript, script_file::write_executable_script,
        synthesized_keys::SynthesizedKeySource,
    },
};

#[derive(Debug)]
pub struct GenerateDumpScriptUseCase<C> {
    catalog: C,
}

impl<C: KeySource + PrimaryKeyLookup> GenerateDumpScriptUseCase<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn execute(&self, command: GenerateDumpScriptCommand) -> Result<GenerateDumpScriptResult> {
        let planner = ChunkPlanner::new(command.chunk_count)?;
        let table = &command.target.table;

        let primary_key =
            resolve_primary_key(&self.catalog, table, command.primary_key.as_deref())?;

        let fallback = SynthesizedKeySource::from_approx_max_id(command.approx_max_id);
        let acquired = acquire_keys(
            &self.catalog,
            fallback.as_ref().map(|source| source as &dyn KeySource),
            table,
            &primary_key,
        )?;

        let boundaries = planner.plan(&acquired.keys)?;
        let script = MysqldumpScript::new(&command.target, &primary_key, &command.output_dir)
            .render(&boundaries);
        write_executable_script(&command.script_path, &script)?;
        tracing::info!(
            path = %command.script_path.display(),
            chunks = boundaries.chunk_count(),
            "mysqldump file ready"
        );

        Ok(GenerateDumpScriptResult {
            script_path: command.script_path,
            chunk_count: boundaries.chunk_count(),
            key_source: acquired.source,
            small_table: acquired.small_table,
        })
    }
}
