use crate::{api, cli::globals::GlobalArgs};
use anyhow::Result;
use secrecy::SecretString;

/// Validated configuration for the server action.
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub secret: SecretString,
    pub frontend_url: String,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("port", &self.port)
            .field("dsn", &self.dsn)
            .field("secret", &"***")
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}

/// Handle the server action
pub async fn handle(args: Args) -> Result<()> {
    let globals = GlobalArgs::new(args.secret, args.frontend_url);

    api::new(args.port, args.dsn, &globals).await?;

    Ok(())
}
