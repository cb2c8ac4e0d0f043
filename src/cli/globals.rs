use secrecy::SecretString;

/// Process-wide configuration shared with the server.
///
/// The signing secret is loaded once at startup; every outstanding session
/// token becomes invalid if it changes.
#[derive(Clone)]
pub struct GlobalArgs {
    pub secret: SecretString,
    pub frontend_url: String,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(secret: SecretString, frontend_url: String) -> Self {
        Self {
            secret,
            frontend_url,
        }
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("secret", &"***")
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}
