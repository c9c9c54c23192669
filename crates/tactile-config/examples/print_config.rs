/// Print the effective cursor configuration
///
/// Run with: cargo run -p tactile-config --example print_config

fn main() {
    // tactile.toml plus TACTILE_* overrides
    let config = tactile_config::TactileConfig::load();

    println!("=== Tactile Configuration ===\n");

    println!("Cursor:");
    println!("  Rotate: {}", config.cursor.rotate);
    println!();

    println!("Gesture:");
    println!("  Dead Zone: {} px", config.gesture.dead_zone_px);
    println!("  Grab Offset: {} deg", config.gesture.grab_offset_degrees);
    println!();

    println!("Logging:");
    println!("  Level: {}", config.logging.level);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
