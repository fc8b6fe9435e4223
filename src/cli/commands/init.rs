use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    let path = Config::default_config_path();

    if Config::create_default_if_missing()? {
        println!("Created {}", path.display());
        println!("Edit it, or set USE_MEMORY_STORAGE / DATABASE_URL / PORT / UPLOADS_DIR.");
    } else {
        println!("{} already exists, leaving it unchanged.", path.display());
    }

    Ok(())
}
