#[cfg(feature = "mysql")]
pub mod mysql_catalog;
#[cfg(not(feature = "mysql"))]
pub mod offline_catalog;
pub mod mysqldump_template;
pub mod script_file;
pub mod synthesized_keys;

use crate::domain::dump_target::DumpTarget;

#[cfg(feature = "mysql")]
pub type Catalog = mysql_catalog::MySqlCatalog;

#[cfg(not(feature = "mysql"))]
pub type Catalog = offline_catalog::OfflineCatalog;

/// The introspecting key source this build supports.
#[cfg(feature = "mysql")]
pub fn catalog_for(target: &DumpTarget) -> Catalog {
    mysql_catalog::MySqlCatalog::new(target)
}

#[cfg(not(feature = "mysql"))]
pub fn catalog_for(_target: &DumpTarget) -> Catalog {
    offline_catalog::OfflineCatalog
}
