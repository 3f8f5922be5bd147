use std::path::{Path, PathBuf};

use sqlparser::ast::{BinaryOperator, Expr, Ident, Value};

use crate::domain::{
    chunk_plan::{BoundarySequence, KeyRange},
    dump_target::{DumpTarget, SqlIdentifier},
};

const MYSQLDUMP_OPTIONS: &str = "--opt --order-by-primary --compress";
const SKIP_CREATE_OPTIONS: &str = "--skip-add-drop-table --no-create-info";

/// Expands a boundary sequence into a bash script of `mysqldump` calls.
#[derive(Debug)]
pub struct MysqldumpScript<'a> {
    target: &'a DumpTarget,
    primary_key: &'a SqlIdentifier,
    output_dir: &'a Path,
}

impl<'a> MysqldumpScript<'a> {
    pub fn new(
        target: &'a DumpTarget,
        primary_key: &'a SqlIdentifier,
        output_dir: &'a Path,
    ) -> Self {
        Self {
            target,
            primary_key,
            output_dir,
        }
    }

    pub fn render(&self, boundaries: &BoundarySequence) -> String {
        let chunk_count = boundaries.chunk_count();
        let mut script = String::from("#!/bin/bash\n");

        for (index, range) in boundaries.iter_ranges().enumerate() {
            let sql_file = self.sql_file_path(index + 1);
            script.push_str(&self.render_command(range, index == 0, &sql_file));
            script.push('\n');
            script.push_str(&format!(
                "echo {}\n",
                shell_quote(&format!("dumped {}", sql_file.display()))
            ));
            if index + 1 < chunk_count {
                script.push_str("sleep 1\n");
            }
        }
        script
    }

    fn sql_file_path(&self, file_number: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}.{file_number:03}.sql", self.target.table))
    }

    fn render_command(&self, range: KeyRange, creates_table: bool, sql_file: &Path) -> String {
        let mut parts = vec![
            "mysqldump".to_string(),
            MYSQLDUMP_OPTIONS.to_string(),
            format!("-h {}", shell_quote(&self.target.host)),
            format!("-u {}", shell_quote(&self.target.user)),
            format!("-p{}", shell_quote(&self.target.password)),
        ];
        if !creates_table {
            parts.push(SKIP_CREATE_OPTIONS.to_string());
        }
        // Every value is single-quoted; identifiers may contain `$`.
        parts.push(format!(
            "-w{}",
            shell_quote(&self.build_range_condition(range).to_string())
        ));
        parts.push(format!("-r {}", shell_quote(&sql_file.display().to_string())));
        parts.push(shell_quote(&self.target.database));
        parts.push(shell_quote(self.target.table.as_str()));
        parts.join(" ")
    }

    fn build_range_condition(&self, range: KeyRange) -> Expr {
        let lower_bound = Expr::BinaryOp {
            left: Box::new(self.qualified_primary_key_expr()),
            op: BinaryOperator::GtEq,
            right: Box::new(number_expr(range.start)),
        };

        match range.end {
            Some(end) => Expr::BinaryOp {
                left: Box::new(lower_bound),
                op: BinaryOperator::And,
                right: Box::new(Expr::BinaryOp {
                    left: Box::new(self.qualified_primary_key_expr()),
                    op: BinaryOperator::Lt,
                    right: Box::new(number_expr(end)),
                }),
            },
            None => lower_bound,
        }
    }

    fn qualified_primary_key_expr(&self) -> Expr {
        Expr::CompoundIdentifier(vec![
            Ident::new(self.target.table.as_str()),
            Ident::new(self.primary_key.as_str()),
        ])
    }
}

fn number_expr(value: i64) -> Expr {
    Expr::value(Value::Number(value.to_string(), false))
}

/// Single-quotes `value` for bash, closing and reopening around embedded quotes.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
