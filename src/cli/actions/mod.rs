use anyhow::Result;

pub mod capability;
pub mod server;

#[derive(Debug)]
pub enum Action {
    Server(server::Args),
    Capability(capability::Args),
}

impl Action {
    /// Run the selected action.
    ///
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        match self {
            Self::Server(args) => server::execute(args).await,
            Self::Capability(args) => capability::execute(&args),
        }
    }
}
