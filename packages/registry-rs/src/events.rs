use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_string, Addr, Coin, Event, Timestamp};

use crate::registry::RegistryConfig;

#[cw_serde]
pub enum DomainEvent {
    ValueChanging {
        old_value: String,
        updater: Addr,
    },
    ValueChanged {
        new_value: String,
        updater: Addr,
        timestamp: Timestamp,
        index: u64,
    },
    ValueReverted {
        index: u64,
        value: String,
        updater: Addr,
    },
    HistoryEntryRemoved {
        index: u64,
        by: Addr,
    },
    HistoryEntryRestored {
        index: u64,
        by: Addr,
    },
    RegistryPaused {
        by: Addr,
    },
    RegistryUnpaused {
        by: Addr,
    },
    RegistryLocked {
        until: Timestamp,
        by: Addr,
    },
    RegistryUnlocked {
        by: Addr,
    },
    AdminAdded {
        address: Addr,
    },
    AdminRemoved {
        address: Addr,
    },
    AdminProposed {
        id: u64,
        address: Addr,
        proposer: Addr,
    },
    AdminProposalApproved {
        id: u64,
    },
    AdminProposalExecuted {
        id: u64,
        address: Addr,
    },
    OwnershipTransferStarted {
        from: Addr,
        to: Addr,
    },
    OwnershipTransferred {
        from: Addr,
        to: Addr,
    },
    OwnershipRenounced {
        previous_owner: Addr,
    },
    ConfigUpdated {
        config: RegistryConfig,
    },
    FundsWithdrawn {
        to: Addr,
        funds: Vec<Coin>,
    },
}

impl From<DomainEvent> for Event {
    fn from(event: DomainEvent) -> Self {
        match event {
            DomainEvent::ValueChanging { old_value, updater } => Event::new("_value_changing")
                .add_attribute("old_value", old_value)
                .add_attribute("updater", updater.as_str()),
            DomainEvent::ValueChanged {
                new_value,
                updater,
                timestamp,
                index,
            } => Event::new("_value_changed")
                .add_attribute("new_value", new_value)
                .add_attribute("updater", updater.as_str())
                .add_attribute("timestamp", timestamp.to_string())
                .add_attribute("index", index.to_string()),
            DomainEvent::ValueReverted {
                index,
                value,
                updater,
            } => Event::new("_value_reverted")
                .add_attribute("index", index.to_string())
                .add_attribute("value", value)
                .add_attribute("updater", updater.as_str()),
            DomainEvent::HistoryEntryRemoved { index, by } => Event::new("_history_entry_removed")
                .add_attribute("index", index.to_string())
                .add_attribute("by", by.as_str()),
            DomainEvent::HistoryEntryRestored { index, by } => {
                Event::new("_history_entry_restored")
                    .add_attribute("index", index.to_string())
                    .add_attribute("by", by.as_str())
            }
            DomainEvent::RegistryPaused { by } => {
                Event::new("_registry_paused").add_attribute("by", by.as_str())
            }
            DomainEvent::RegistryUnpaused { by } => {
                Event::new("_registry_unpaused").add_attribute("by", by.as_str())
            }
            DomainEvent::RegistryLocked { until, by } => Event::new("_registry_locked")
                .add_attribute("until", until.to_string())
                .add_attribute("by", by.as_str()),
            DomainEvent::RegistryUnlocked { by } => {
                Event::new("_registry_unlocked").add_attribute("by", by.as_str())
            }
            DomainEvent::AdminAdded { address } => {
                Event::new("_admin_added").add_attribute("address", address.as_str())
            }
            DomainEvent::AdminRemoved { address } => {
                Event::new("_admin_removed").add_attribute("address", address.as_str())
            }
            DomainEvent::AdminProposed {
                id,
                address,
                proposer,
            } => Event::new("_admin_proposed")
                .add_attribute("id", id.to_string())
                .add_attribute("address", address.as_str())
                .add_attribute("proposer", proposer.as_str()),
            DomainEvent::AdminProposalApproved { id } => {
                Event::new("_admin_proposal_approved").add_attribute("id", id.to_string())
            }
            DomainEvent::AdminProposalExecuted { id, address } => {
                Event::new("_admin_proposal_executed")
                    .add_attribute("id", id.to_string())
                    .add_attribute("address", address.as_str())
            }
            DomainEvent::OwnershipTransferStarted { from, to } => {
                Event::new("_ownership_transfer_started")
                    .add_attribute("from", from.as_str())
                    .add_attribute("to", to.as_str())
            }
            DomainEvent::OwnershipTransferred { from, to } => Event::new("_ownership_transferred")
                .add_attribute("from", from.as_str())
                .add_attribute("to", to.as_str()),
            DomainEvent::OwnershipRenounced { previous_owner } => {
                Event::new("_ownership_renounced")
                    .add_attribute("previous_owner", previous_owner.as_str())
            }
            DomainEvent::ConfigUpdated { config } => Event::new("_config_updated").add_attribute(
                "config",
                to_json_string(&config).expect("Failed to serialize config"),
            ),
            DomainEvent::FundsWithdrawn { to, funds } => Event::new("_funds_withdrawn")
                .add_attribute("to", to.as_str())
                .add_attribute(
                    "funds",
                    to_json_string(&funds).expect("Failed to serialize withdrawn funds"),
                ),
        }
    }
}
