use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::{connect, OutputFormat};
use crate::config::AppConfig;
use crate::database::Store;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user")]
    Add {
        #[arg(long, help = "Display name")]
        name: String,

        #[arg(long, help = "Email address")]
        email: String,
    },
}

pub async fn handle(cmd: UserCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Add { name, email } => {
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("User name must not be empty");
            }

            let store = connect(config).await?;
            let user = store.create_user(name, email.trim()).await?;
            store.close().await;

            output_success(
                output_format,
                &format!("Created user {} ({})", user.id, user.name),
                Some(json!({ "user": user })),
            )
        }
    }
}
