mod application;
mod domain;
mod infrastructure;
mod interfaces;

use anyhow::Result;
use console::style;

use crate::application::use_cases::generate_dump_script::GenerateDumpScriptUseCase;
use crate::infrastructure::catalog_for;
use crate::interfaces::{cli::collect_generate_command, logging::init_logging};

fn main() -> Result<()> {
    let request = match collect_generate_command() {
        Ok(request) => request,
        Err(error) => {
            init_logging(0)?;
            tracing::error!("{error:#}");
            std::process::exit(1);
        }
    };
    init_logging(request.verbosity)?;

    let use_case = GenerateDumpScriptUseCase::new(catalog_for(&request.command.target));
    let result = match use_case.execute(request.command) {
        Ok(result) => result,
        Err(error) => {
            tracing::error!("{error:#}");
            std::process::exit(1);
        }
    };

    println!("{}", style("mysqldump file ready:").green());
    println!(
        "  {} ({} files, keys from {})",
        style(result.script_path.display()).bold(),
        result.chunk_count,
        result.key_source,
    );
    if result.small_table {
        println!(
            "{}",
            style("Table is small, a single mysqldump may serve just as well").dim()
        );
    }
    Ok(())
}
