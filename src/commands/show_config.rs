use crate::config::Config;
use anyhow::Result;

pub fn run(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    println!("# database: {}", config.database_path().display());
    Ok(())
}
