use std::path::PathBuf;

use tepang_core::{AssetCatalog, Config};

fn describe(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            if p.exists() {
                p.display().to_string()
            } else {
                format!("{} (missing)", p.display())
            }
        })
        .collect()
}

pub fn run(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = AssetCatalog::from_config(&config.assets);
    let sounds = catalog.notification_sounds();
    let tracks = catalog.music_tracks();

    if json {
        let out = serde_json::json!({
            "root": catalog.root(),
            "notification_sounds": sounds,
            "music_tracks": tracks,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("root: {}", catalog.root().display());
    println!("notification sounds:");
    for line in describe(&sounds) {
        println!("  {line}");
    }
    println!("music tracks:");
    for line in describe(&tracks) {
        println!("  {line}");
    }
    Ok(())
}
