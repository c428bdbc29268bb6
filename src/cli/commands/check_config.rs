//! Check-config command handler

use crate::config::Config;
use crate::services::UserDirectory;

pub fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    config.validate()?;
    let directory = UserDirectory::from_entries(&config.users)?;

    println!(
        "Config OK. Listening on {}:{}",
        config.server.host, config.server.port
    );
    println!();
    println!("User directory ({} total)", directory.len());
    println!("{:-<50}", "");

    for user in directory.users() {
        let status = if user.disabled { "disabled" } else { "active" };
        println!(
            "{} [{}] {}",
            user.username,
            status,
            user.full_name.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
