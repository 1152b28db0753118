pub mod classify;
pub mod import;
pub mod organism;
pub mod show_config;
pub mod tree;

use crate::config::Config;
use crate::database::SnpDatabase;
use anyhow::Result;

pub(crate) fn open_database(config: &Config) -> Result<SnpDatabase> {
    SnpDatabase::open(config.database_path())
}
