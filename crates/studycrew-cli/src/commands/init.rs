//! The `studycrew init` command.

use anyhow::Result;

use studycrew_client::config::SAMPLE_CONFIG;

pub fn execute() -> Result<()> {
    if std::path::Path::new("studycrew.toml").exists() {
        println!("studycrew.toml already exists, skipping.");
    } else {
        std::fs::write("studycrew.toml", SAMPLE_CONFIG)?;
        println!("Created studycrew.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point base_url in studycrew.toml at your backend");
    println!("  2. Run: studycrew register --name ... --email ... --password ...");
    println!("  3. Run: studycrew dashboard");

    Ok(())
}
