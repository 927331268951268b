use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp};
use sha2::{Digest, Sha256};

/// Sha256 digest of a value. Two values are considered equal iff their
/// checksums match, so large strings are never compared byte-for-byte.
pub fn value_checksum(value: &str) -> Binary {
    Binary::new(Sha256::digest(value.as_bytes()).to_vec())
}

#[cw_serde]
pub struct RegistryConfig {
    /// Succeed without appending a history entry when the incoming value
    /// checksum matches the current one.
    pub noop_on_unchanged: bool,
    /// Minimum seconds between accepted value mutations. None disables
    /// rate limiting.
    pub min_update_interval: Option<u64>,
    /// When false, value queries fail while the registry is paused.
    pub readable_while_paused: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            noop_on_unchanged: true,
            min_update_interval: None,
            readable_while_paused: true,
        }
    }
}

#[cw_serde]
pub struct HistoryEntry {
    pub index: u64,
    pub value: String,
    pub checksum: Binary,
    pub updater: Addr,
    pub timestamp: Timestamp,
    pub note: Option<String>,
    pub removed: bool,
}

#[cw_serde]
pub struct AdminProposal {
    pub id: u64,
    pub proposed_admin: Addr,
    pub proposer: Addr,
    pub timestamp: Timestamp,
    pub approved: bool,
    pub executed: bool,
}

#[cw_serde]
pub struct RegistryInstantiateMsg {
    pub value: String,
    pub note: Option<String>,
    pub admins: Vec<Addr>,
    pub config: Option<RegistryConfig>,
}

#[cw_serde]
pub enum RegistryExecuteMsg {
    SetValue {
        value: String,
        note: Option<String>,
    },
    RevertTo {
        index: u64,
        note: Option<String>,
    },
    RemoveHistoryEntry {
        index: u64,
    },
    RestoreHistoryEntry {
        index: u64,
    },
    Pause {},
    Unpause {},
    Lock {
        duration: u64,
    },
    Unlock {},
    AddAdmin {
        address: String,
    },
    RemoveAdmin {
        address: String,
    },
    ProposeAdmin {
        address: String,
    },
    ApproveAdmin {
        id: u64,
    },
    ExecuteAdminProposal {
        id: u64,
    },
    TransferOwnership {
        new_owner: String,
    },
    AcceptOwnership {},
    RenounceOwnership {},
    UpdateConfig {
        config: RegistryConfig,
    },
    Withdraw {
        denoms: Vec<String>,
        to: Option<Addr>,
    },
}

#[cw_serde]
pub struct RegistryInfo {
    pub value: String,
    pub updated_at: Timestamp,
    pub owner: Option<Addr>,
    pub pending_owner: Option<Addr>,
    pub paused: bool,
    pub lock_until: Option<Timestamp>,
    pub update_count: u64,
    pub admin_count: u64,
    pub history_length: u64,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum RegistryQueryMsg {
    #[returns(String)]
    Value {},
    #[returns(RegistryInfo)]
    Info {},
    #[returns(RegistryConfig)]
    Config {},
    #[returns(HistoryEntry)]
    HistoryEntry { index: u64 },
    #[returns(Vec<HistoryEntry>)]
    History {
        offset: Option<u64>,
        limit: Option<u16>,
    },
    #[returns(Vec<Addr>)]
    Admins {
        start_after: Option<Addr>,
        limit: Option<u16>,
    },
    #[returns(Vec<AdminProposal>)]
    Proposals {
        start_after: Option<u64>,
        limit: Option<u16>,
    },
}
