use anyhow::{Result, anyhow};
use std::io::{self, Write};

use crate::core::AppConfig;
use crate::google::{AuthOutcome, GoogleAuth};

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum AuthAction {
    /// Print the consent URL
    Url,
    /// Print the consent URL then exchange a pasted authorization code
    Exchange,
    /// Show whether a calendar is connected
    Status,
    /// Remove the stored credentials
    Disconnect,
}

pub async fn run(action: AuthAction) -> Result<()> {
    let config = AppConfig::from_env()?;
    let auth = GoogleAuth::new(&config)?;

    match action {
        AuthAction::Url => {
            println!("{}", auth.authorization_url()?);
        }
        AuthAction::Exchange => {
            let auth_url = auth.authorization_url()?;
            println!(
                "\nPlease open the following URL in your browser and authorize access:\n\n{}\n",
                auth_url
            );
            print!("Paste the authorization code from the redirect URL here: ");
            io::stdout().flush()?;
            let mut code = String::new();
            io::stdin().read_line(&mut code)?;
            let code = code.trim();
            if code.is_empty() {
                return Err(anyhow!("No authorization code provided"));
            }

            let outcome = auth.complete_authorization(code).await;
            println!("{}", outcome.message());
            match outcome {
                AuthOutcome::Connected { email: Some(email) } => {
                    println!("Credentials for {} saved to {}", email, auth.store().path().display());
                }
                AuthOutcome::Connected { email: None } => {
                    println!("Credentials saved to {}", auth.store().path().display());
                }
                AuthOutcome::Failed { .. } => {
                    return Err(anyhow!("Google authorization failed"));
                }
            }
        }
        AuthAction::Status => {
            let status = auth.get_status().await;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        AuthAction::Disconnect => match auth.disconnect() {
            Ok(()) => println!("Successfully disconnected from Google Calendar"),
            Err(err) => return Err(anyhow!("Failed to disconnect: {}", err)),
        },
    }

    Ok(())
}
