//! Config subcommands handler

use anyhow::Result;

use termynal::Config;

/// Show the configuration file contents as TOML.
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = config.to_toml()?;
    if toml_str.trim().is_empty() || config.options.is_empty() {
        let path = Config::config_path()?;
        println!("# No options set in {}", path.display());
    }
    print!("{toml_str}");
    Ok(())
}

/// Print where the configuration file is read from.
pub fn handle_path() -> Result<()> {
    let path = Config::config_path()?;
    println!("{}", path.display());
    Ok(())
}
