use crate::app::error::Result;
use crate::config::Config;
use crate::interact::{ConsoleInteract, Interact};

pub struct AppContext {
    pub config: Config,
    pub ui: Box<dyn Interact>,
}

impl AppContext {
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self {
            config,
            ui: Box::new(ConsoleInteract::new()),
        })
    }

    /// Context with an explicit config and interaction layer, used by tests
    /// to run the pipeline without a terminal.
    pub fn with_parts(config: Config, ui: Box<dyn Interact>) -> Self {
        Self { config, ui }
    }
}
