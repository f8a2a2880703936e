use serde::{Deserialize, Serialize};

/// Which parts of each transaction block to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub show_confirmed_signer: bool,
    pub show_pending_signer: bool,
    pub show_status_icon: bool,
    pub show_chain_icon: bool,
    pub show_tx_note: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_confirmed_signer: false,
            show_pending_signer: true,
            show_status_icon: false,
            show_chain_icon: true,
            show_tx_note: true,
        }
    }
}

impl DisplayOptions {
    /// Every option switched on
    pub fn all() -> Self {
        Self {
            show_confirmed_signer: true,
            show_pending_signer: true,
            show_status_icon: true,
            show_chain_icon: true,
            show_tx_note: true,
        }
    }

    /// Ownership data is only worth fetching when a signer set is displayed
    pub fn needs_ownership(&self) -> bool {
        self.show_confirmed_signer || self.show_pending_signer
    }
}
