use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_empty_collection, output_success};
use crate::cli::{connect, OutputFormat};
use crate::config::AppConfig;
use crate::database::Store;

#[derive(Subcommand)]
pub enum ColorCommands {
    #[command(about = "Add a palette color")]
    Add {
        #[arg(long, help = "Color name")]
        name: String,

        #[arg(long, help = "Hex code, e.g. #ff0000")]
        hex: String,
    },

    #[command(about = "List palette colors")]
    List,
}

/// Accepts `#rgb` or `#rrggbb`, with or without the leading `#`
pub fn normalize_hex(raw: &str) -> anyhow::Result<String> {
    let digits = raw.trim().trim_start_matches('#');
    if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("Invalid hex color '{}'", raw);
    }
    Ok(format!("#{}", digits.to_ascii_lowercase()))
}

pub async fn handle(cmd: ColorCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ColorCommands::Add { name, hex } => {
            let hex = normalize_hex(&hex)?;
            let store = connect(config).await?;
            let color = store.create_color(name.trim(), &hex).await?;
            store.close().await;

            output_success(
                output_format,
                &format!("Created color {} ({} {})", color.id, color.name, color.hex),
                Some(json!({ "color": color })),
            )
        }
        ColorCommands::List => {
            let store = connect(config).await?;
            let colors = store.colors().await?;
            store.close().await;

            if colors.is_empty() {
                return output_empty_collection(output_format, "colors", "No colors configured");
            }

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "colors": colors }))?);
                }
                OutputFormat::Text => {
                    println!("{:<6} {:<20} {}", "ID", "NAME", "HEX");
                    println!("{}", "-".repeat(36));
                    for color in &colors {
                        println!("{:<6} {:<20} {}", color.id, color.name, color.hex);
                    }
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_codes_are_normalized() {
        assert_eq!(normalize_hex("#FF0000").unwrap(), "#ff0000");
        assert_eq!(normalize_hex("abc").unwrap(), "#abc");
        assert!(normalize_hex("#ff00").is_err());
        assert!(normalize_hex("zzzzzz").is_err());
    }
}
