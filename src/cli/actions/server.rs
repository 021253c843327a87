use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::konto::new;
use anyhow::{anyhow, Result};
use url::Url;

/// Handle the server action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Server { port, dsn } => {
            let dsn = Url::parse(&dsn)?;

            if !matches!(dsn.scheme(), "postgres" | "postgresql") {
                return Err(anyhow!("Unsupported DSN scheme: {}", dsn.scheme()));
            }

            new(port, dsn.to_string(), globals).await?;
        }
    }

    Ok(())
}
