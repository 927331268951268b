use cosmwasm_std::{Addr, OverflowError, Response, StdError, Timestamp};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Value must not be empty")]
    EmptyValue {},

    #[error("Registry is paused")]
    ContractPaused {},

    #[error("Registry is locked until {until}")]
    AttributeLocked { until: Timestamp },

    #[error("Rate limited, retry at {retry_at}")]
    RateLimited { retry_at: Timestamp },

    #[error("Reentrant call detected")]
    ReentrancyDetected {},

    #[error("Index {index} out of bounds, history length is {length}")]
    IndexOutOfBounds { index: u64, length: u64 },

    #[error("History entry {index} is removed")]
    EntryRemoved { index: u64 },

    #[error("History entry {index} is not removed")]
    EntryNotRemoved { index: u64 },

    #[error("{address} is already an admin")]
    AlreadyAdmin { address: Addr },

    #[error("{address} is not an admin")]
    NotAdmin { address: Addr },

    #[error("No pending ownership transfer")]
    NoPendingOwner {},

    #[error("Nothing to withdraw")]
    NothingToWithdraw {},

    #[error("Proposal {id} is not approved")]
    ProposalNotApproved { id: u64 },

    #[error("Proposal {id} is already approved")]
    ProposalAlreadyApproved { id: u64 },

    #[error("Proposal {id} is already executed")]
    ProposalAlreadyExecuted { id: u64 },
}

impl ContractError {
    pub fn generic_err(msg: impl Into<String>) -> Self {
        ContractError::Std(StdError::generic_err(msg.into()))
    }
}

pub type ContractResult = Result<Response, ContractError>;
