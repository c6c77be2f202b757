use anyhow::{Result, bail};
use tracing::{info, warn};

const USERNAME: &str = "Chatrine";
const PASSWORD: &str = "nailong";

pub(crate) const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum LoginOutcome {
    Granted,
    Rejected,
    /// The gate already let someone in.
    Closed,
}

/// One-shot gate in front of the journal.
pub(crate) struct LoginGate {
    granted: bool,
}

impl LoginGate {
    pub(crate) fn new() -> Self {
        Self { granted: false }
    }

    pub(crate) fn attempt(&mut self, username: &str, password: &str) -> LoginOutcome {
        if self.granted {
            return LoginOutcome::Closed;
        }
        if username == USERNAME && password == PASSWORD {
            self.granted = true;
            info!(username, "login granted");
            LoginOutcome::Granted
        } else {
            warn!(username, "login rejected");
            LoginOutcome::Rejected
        }
    }
}

/// Non-interactive login used by subcommands.
pub(crate) fn login(username: &str, password: &str) -> Result<()> {
    match LoginGate::new().attempt(username, password) {
        LoginOutcome::Granted => Ok(()),
        LoginOutcome::Rejected | LoginOutcome::Closed => bail!(INVALID_CREDENTIALS),
    }
}
