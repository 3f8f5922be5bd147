use std::{
    env,
    path::{self, PathBuf},
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use console::style;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use crate::{application::commands::GenerateDumpScriptCommand, domain::dump_target::DumpTarget};

/// What the user asked for, plus how chatty the logs should be.
#[derive(Debug)]
pub struct CliRequest {
    pub command: GenerateDumpScriptCommand,
    pub verbosity: u8,
}

const DEFAULT_CHUNK_COUNT: usize = 10;
const DEFAULT_OUTPUT_DIR: &str = "./";

#[derive(Debug, Parser)]
#[command(
    name = "pk-chunk-dump",
    version,
    about = "Create mysqldump commands to dump a large database table in chunks"
)]
struct CliArgs {
    #[arg(help = "MySQL server hostname or ip address")]
    server: String,
    #[arg(help = "MySQL database name")]
    database: String,
    #[arg(help = "MySQL table name to be dumped")]
    table: String,
    #[arg(help = "MySQL user")]
    user: String,
    #[arg(help = "MySQL password")]
    password: String,
    #[arg(
        long,
        short = 'c',
        default_value_t = DEFAULT_CHUNK_COUNT,
        help = "Number of .sql dump files to create"
    )]
    dumpfile_count: usize,
    #[arg(long, short = 'i', help = "Table primary key column, introspected when omitted")]
    db_primary_key: Option<String>,
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT_DIR, help = "Output dir for .sql files")]
    output_dir: PathBuf,
    #[arg(
        long,
        short = 'f',
        help = "File to save mysqldump commands [default: mysqldump-<server>-<database>-<table>]"
    )]
    mysqldump_script_file: Option<PathBuf>,
    #[arg(long, short = 'v', action = ArgAction::Count, help = "Verbose output, repeat for debug")]
    verbose: u8,
    // Stands in for the table's keys when the database cannot be queried. It need
    // not be exact, but dump file sizes drift the further off it is.
    #[arg(
        long,
        short = 'm',
        default_value_t = 0,
        value_parser = clap::value_parser!(i64).range(0..),
        help = "Approximate value of the max primary key, 0 = introspect"
    )]
    db_max_id: i64,
}

pub fn collect_generate_command() -> Result<CliRequest> {
    if env::args_os().len() == 1 {
        return collect_interactive_command();
    }
    collect_command_from_args(CliArgs::parse())
}

fn collect_command_from_args(args: CliArgs) -> Result<CliRequest> {
    let target = DumpTarget::new(
        &args.server,
        &args.database,
        &args.table,
        &args.user,
        &args.password,
    )?;

    let script_path = args.mysqldump_script_file.unwrap_or_else(|| {
        PathBuf::from(format!(
            "mysqldump-{}-{}-{}",
            target.host, target.database, target.table
        ))
    });
    let output_dir = if args.output_dir.as_os_str().is_empty() {
        PathBuf::from(DEFAULT_OUTPUT_DIR)
    } else {
        args.output_dir
    };

    let command = GenerateDumpScriptCommand {
        primary_key: args
            .db_primary_key
            .filter(|column| !column.trim().is_empty()),
        chunk_count: args.dumpfile_count,
        output_dir: absolute_path(output_dir)?,
        script_path: absolute_path(script_path)?,
        approx_max_id: args.db_max_id,
        target,
    };
    Ok(CliRequest {
        command,
        verbosity: args.verbose,
    })
}

fn collect_interactive_command() -> Result<CliRequest> {
    let theme = ColorfulTheme::default();

    println!();
    println!(
        "{}",
        style(" MYSQL CHUNK DUMP ")
            .black()
            .on_cyan()
            .bold()
            .underlined()
    );
    println!(
        "{}",
        style("Split one large table into primary-key ranged dump files").dim()
    );
    println!();

    let server: String = Input::with_theme(&theme)
        .with_prompt("MySQL server")
        .interact_text()?;
    let database: String = Input::with_theme(&theme)
        .with_prompt("Database")
        .interact_text()?;
    let table: String = Input::with_theme(&theme)
        .with_prompt("Table")
        .interact_text()?;
    let user: String = Input::with_theme(&theme)
        .with_prompt("User")
        .interact_text()?;
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;

    let db_primary_key: String = Input::with_theme(&theme)
        .with_prompt("Primary key column (empty to introspect)")
        .allow_empty(true)
        .interact_text()?;

    let dumpfile_count: usize = Input::with_theme(&theme)
        .with_prompt("Number of dump files")
        .default(DEFAULT_CHUNK_COUNT)
        .validate_with(|value: &usize| {
            if *value == 0 {
                Err("Number of dump files must be greater than 0")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let output_dir: String = Input::with_theme(&theme)
        .with_prompt("Output dir for .sql files")
        .default(DEFAULT_OUTPUT_DIR.to_string())
        .interact_text()?;

    let script_file: String = Input::with_theme(&theme)
        .with_prompt("Script file (empty for default name)")
        .allow_empty(true)
        .interact_text()?;

    let db_max_id: i64 = Input::with_theme(&theme)
        .with_prompt("Approximate max primary key (0 = introspect)")
        .default(0)
        .validate_with(|value: &i64| {
            if *value < 0 {
                Err("Max primary key must not be negative")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let verbose = Confirm::with_theme(&theme)
        .with_prompt("Verbose output?")
        .default(false)
        .interact()?;

    collect_command_from_args(CliArgs {
        server,
        database,
        table,
        user,
        password,
        dumpfile_count,
        db_primary_key: Some(db_primary_key),
        output_dir: PathBuf::from(output_dir.trim()),
        mysqldump_script_file: Some(script_file.trim())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from),
        verbose: u8::from(verbose),
        db_max_id,
    })
}

fn absolute_path(relative: PathBuf) -> Result<PathBuf> {
    path::absolute(&relative)
        .with_context(|| format!("Unable to resolve path: {}", relative.display()))
}
