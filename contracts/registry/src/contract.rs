use std::cmp::min;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Response,
    StdError, StdResult, Storage,
};
use cw_utils::nonpayable;
use registry_rs::{
    constants::MAX_LOCK_DURATION,
    core::{ContractError, ContractResult},
    events::DomainEvent,
    registry::{
        value_checksum, AdminProposal, HistoryEntry, RegistryConfig, RegistryExecuteMsg,
        RegistryInfo, RegistryInstantiateMsg, RegistryQueryMsg,
    },
};

use crate::state::{
    CurrentValue, Ownership, WriteAccess, ADMINS, CONFIG, CURRENT, GUARD, HISTORY, OWNERSHIP,
    PROPOSALS, WRITE_ACCESS,
};

const CONTRACT_NAME: &str = "crates.io:registry";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: RegistryInstantiateMsg,
) -> ContractResult {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.value.is_empty() {
        return Err(ContractError::EmptyValue {});
    }

    CONFIG.save(deps.storage, &msg.config.unwrap_or_default())?;

    OWNERSHIP.save(
        deps.storage,
        &Ownership {
            owner: Some(info.sender.clone()),
            pending_owner: None,
        },
    )?;

    WRITE_ACCESS.save(
        deps.storage,
        &WriteAccess {
            paused: false,
            lock_until: None,
            last_update: None,
        },
    )?;

    GUARD.save(deps.storage, &false)?;

    for admin in msg.admins {
        let admin = deps
            .api
            .addr_validate(admin.as_str())
            .map_err(|_| ContractError::InvalidAddress {
                reason: admin.to_string(),
            })?;

        ADMINS.add(deps.storage, &admin)?;
    }

    let checksum = value_checksum(&msg.value);

    let entry = HISTORY.append(
        deps.storage,
        msg.value.clone(),
        checksum.clone(),
        info.sender.clone(),
        env.block.time,
        msg.note,
    )?;

    CURRENT.save(
        deps.storage,
        &CurrentValue {
            value: msg.value.clone(),
            checksum,
            updated_at: env.block.time,
        },
    )?;

    Ok(Response::default()
        .add_attribute("initialized", "true")
        .add_event(DomainEvent::ValueChanged {
            new_value: msg.value,
            updater: info.sender,
            timestamp: env.block.time,
            index: entry.index,
        }))
}

#[cw_serde]
pub struct RegistryMigrateMsg {}

#[entry_point]
pub fn migrate(_deps: DepsMut, _env: Env, _msg: RegistryMigrateMsg) -> ContractResult {
    Ok(Response::default().add_attribute("migrated", "true"))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: RegistryExecuteMsg,
) -> ContractResult {
    nonpayable(&info)?;

    match msg {
        RegistryExecuteMsg::SetValue { value, note } => set_value(deps, env, info, value, note),
        RegistryExecuteMsg::RevertTo { index, note } => revert_to(deps, env, info, index, note),
        RegistryExecuteMsg::RemoveHistoryEntry { index } => {
            set_entry_removed(deps, env, info, index, true)
        }
        RegistryExecuteMsg::RestoreHistoryEntry { index } => {
            set_entry_removed(deps, env, info, index, false)
        }
        RegistryExecuteMsg::Pause {} => set_paused(deps, info, true),
        RegistryExecuteMsg::Unpause {} => set_paused(deps, info, false),
        RegistryExecuteMsg::Lock { duration } => lock(deps, env, info, duration),
        RegistryExecuteMsg::Unlock {} => unlock(deps, info),
        RegistryExecuteMsg::AddAdmin { address } => add_admin(deps, info, address),
        RegistryExecuteMsg::RemoveAdmin { address } => remove_admin(deps, info, address),
        RegistryExecuteMsg::ProposeAdmin { address } => propose_admin(deps, env, info, address),
        RegistryExecuteMsg::ApproveAdmin { id } => approve_admin(deps, info, id),
        RegistryExecuteMsg::ExecuteAdminProposal { id } => execute_admin_proposal(deps, id),
        RegistryExecuteMsg::TransferOwnership { new_owner } => {
            transfer_ownership(deps, info, new_owner)
        }
        RegistryExecuteMsg::AcceptOwnership {} => accept_ownership(deps, info),
        RegistryExecuteMsg::RenounceOwnership {} => renounce_ownership(deps, info),
        RegistryExecuteMsg::UpdateConfig { config } => update_config(deps, info, config),
        RegistryExecuteMsg::Withdraw { denoms, to } => withdraw(deps, env, info, denoms, to),
    }
}

fn ensure_owner(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if OWNERSHIP.load(storage)?.owner.as_ref() == Some(sender) {
        return Ok(());
    }

    Err(ContractError::Unauthorized {})
}

fn ensure_privileged(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if OWNERSHIP.load(storage)?.owner.as_ref() == Some(sender)
        || ADMINS.is_admin(storage, sender)
    {
        return Ok(());
    }

    Err(ContractError::Unauthorized {})
}

// Pause wins over lock; lock expiry is evaluated lazily against block time.
fn ensure_writable(storage: &dyn Storage, env: &Env) -> Result<(), ContractError> {
    let access = WRITE_ACCESS.load(storage)?;

    if access.paused {
        return Err(ContractError::ContractPaused {});
    }

    if let Some(until) = access.lock_until {
        if env.block.time < until {
            return Err(ContractError::AttributeLocked { until });
        }
    }

    Ok(())
}

fn ensure_interval_elapsed(storage: &dyn Storage, env: &Env) -> Result<(), ContractError> {
    if let Some(interval) = CONFIG.load(storage)?.min_update_interval {
        if let Some(last) = WRITE_ACCESS.load(storage)?.last_update {
            let retry_at = last.plus_seconds(interval);

            if env.block.time < retry_at {
                return Err(ContractError::RateLimited { retry_at });
            }
        }
    }

    Ok(())
}

fn validated(deps: &DepsMut, address: &str) -> Result<Addr, ContractError> {
    deps.api
        .addr_validate(address)
        .map_err(|_| ContractError::InvalidAddress {
            reason: address.to_string(),
        })
}

/// Appends the accepted value to the history and swaps the current value,
/// returning the new entry and the value it replaced.
fn commit_value(
    storage: &mut dyn Storage,
    env: &Env,
    updater: &Addr,
    value: String,
    checksum: Binary,
    note: Option<String>,
) -> Result<(HistoryEntry, CurrentValue), ContractError> {
    let entry = HISTORY.append(
        storage,
        value.clone(),
        checksum.clone(),
        updater.clone(),
        env.block.time,
        note,
    )?;

    let previous = CURRENT.load(storage)?;

    CURRENT.save(
        storage,
        &CurrentValue {
            value,
            checksum,
            updated_at: env.block.time,
        },
    )?;

    let access = WRITE_ACCESS.load(storage)?;

    WRITE_ACCESS.save(
        storage,
        &WriteAccess {
            last_update: Some(env.block.time),
            ..access
        },
    )?;

    Ok((entry, previous))
}

fn set_value(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    value: String,
    note: Option<String>,
) -> ContractResult {
    ensure_privileged(deps.storage, &info.sender)?;
    ensure_writable(deps.storage, &env)?;
    ensure_interval_elapsed(deps.storage, &env)?;

    if value.is_empty() {
        return Err(ContractError::EmptyValue {});
    }

    let checksum = value_checksum(&value);
    let current = CURRENT.load(deps.storage)?;

    if checksum == current.checksum && CONFIG.load(deps.storage)?.noop_on_unchanged {
        return Ok(Response::default().add_attribute("noop", "true"));
    }

    let (entry, previous) = commit_value(deps.storage, &env, &info.sender, value, checksum, note)?;

    Ok(Response::default()
        .add_event(DomainEvent::ValueChanging {
            old_value: previous.value,
            updater: info.sender.clone(),
        })
        .add_event(DomainEvent::ValueChanged {
            new_value: entry.value,
            updater: info.sender,
            timestamp: env.block.time,
            index: entry.index,
        }))
}

fn revert_to(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    index: u64,
    note: Option<String>,
) -> ContractResult {
    ensure_privileged(deps.storage, &info.sender)?;
    ensure_writable(deps.storage, &env)?;
    ensure_interval_elapsed(deps.storage, &env)?;

    let length = HISTORY.len(deps.storage)?;

    if index >= length {
        return Err(ContractError::IndexOutOfBounds { index, length });
    }

    let target = HISTORY.load(deps.storage, index)?;

    if target.removed {
        return Err(ContractError::EntryRemoved { index });
    }

    // Undo is modeled by appending, never by rewriting the trail.
    let (entry, previous) = commit_value(
        deps.storage,
        &env,
        &info.sender,
        target.value.clone(),
        target.checksum,
        note,
    )?;

    Ok(Response::default()
        .add_event(DomainEvent::ValueReverted {
            index,
            value: target.value,
            updater: info.sender.clone(),
        })
        .add_event(DomainEvent::ValueChanging {
            old_value: previous.value,
            updater: info.sender.clone(),
        })
        .add_event(DomainEvent::ValueChanged {
            new_value: entry.value,
            updater: info.sender,
            timestamp: env.block.time,
            index: entry.index,
        }))
}

fn set_entry_removed(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    index: u64,
    removed: bool,
) -> ContractResult {
    ensure_privileged(deps.storage, &info.sender)?;
    ensure_writable(deps.storage, &env)?;

    let length = HISTORY.len(deps.storage)?;

    if index >= length {
        return Err(ContractError::IndexOutOfBounds { index, length });
    }

    let target = HISTORY.load(deps.storage, index)?;

    if target.removed == removed {
        return Err(match removed {
            true => ContractError::EntryRemoved { index },
            false => ContractError::EntryNotRemoved { index },
        });
    }

    HISTORY.set_removed(deps.storage, index, removed)?;

    Ok(Response::default().add_event(match removed {
        true => DomainEvent::HistoryEntryRemoved {
            index,
            by: info.sender,
        },
        false => DomainEvent::HistoryEntryRestored {
            index,
            by: info.sender,
        },
    }))
}

fn set_paused(deps: DepsMut, info: MessageInfo, paused: bool) -> ContractResult {
    ensure_owner(deps.storage, &info.sender)?;

    let access = WRITE_ACCESS.load(deps.storage)?;

    WRITE_ACCESS.save(deps.storage, &WriteAccess { paused, ..access })?;

    Ok(Response::default().add_event(match paused {
        true => DomainEvent::RegistryPaused { by: info.sender },
        false => DomainEvent::RegistryUnpaused { by: info.sender },
    }))
}

fn lock(deps: DepsMut, env: Env, info: MessageInfo, duration: u64) -> ContractResult {
    ensure_owner(deps.storage, &info.sender)?;

    if duration == 0 {
        return Err(ContractError::generic_err(
            "Lock duration must be greater than zero",
        ));
    }

    let until = env
        .block
        .time
        .plus_seconds(min(duration, MAX_LOCK_DURATION));

    let access = WRITE_ACCESS.load(deps.storage)?;

    WRITE_ACCESS.save(
        deps.storage,
        &WriteAccess {
            lock_until: Some(until),
            ..access
        },
    )?;

    Ok(Response::default().add_event(DomainEvent::RegistryLocked {
        until,
        by: info.sender,
    }))
}

fn unlock(deps: DepsMut, info: MessageInfo) -> ContractResult {
    ensure_owner(deps.storage, &info.sender)?;

    let access = WRITE_ACCESS.load(deps.storage)?;

    WRITE_ACCESS.save(
        deps.storage,
        &WriteAccess {
            lock_until: None,
            ..access
        },
    )?;

    Ok(Response::default().add_event(DomainEvent::RegistryUnlocked { by: info.sender }))
}

fn add_admin(deps: DepsMut, info: MessageInfo, address: String) -> ContractResult {
    ensure_owner(deps.storage, &info.sender)?;

    let address = validated(&deps, &address)?;

    if !ADMINS.add(deps.storage, &address)? {
        return Err(ContractError::AlreadyAdmin { address });
    }

    Ok(Response::default().add_event(DomainEvent::AdminAdded { address }))
}

fn remove_admin(deps: DepsMut, info: MessageInfo, address: String) -> ContractResult {
    ensure_owner(deps.storage, &info.sender)?;

    let address = validated(&deps, &address)?;

    if !ADMINS.remove(deps.storage, &address)? {
        return Err(ContractError::NotAdmin { address });
    }

    Ok(Response::default().add_event(DomainEvent::AdminRemoved { address }))
}

fn propose_admin(deps: DepsMut, env: Env, info: MessageInfo, address: String) -> ContractResult {
    ensure_privileged(deps.storage, &info.sender)?;

    let address = validated(&deps, &address)?;

    if ADMINS.is_admin(deps.storage, &address) {
        return Err(ContractError::AlreadyAdmin { address });
    }

    let proposal = PROPOSALS.create(
        deps.storage,
        address.clone(),
        info.sender.clone(),
        env.block.time,
    )?;

    Ok(Response::default().add_event(DomainEvent::AdminProposed {
        id: proposal.id,
        address,
        proposer: info.sender,
    }))
}

fn approve_admin(deps: DepsMut, info: MessageInfo, id: u64) -> ContractResult {
    ensure_owner(deps.storage, &info.sender)?;

    let proposal = PROPOSALS.load(deps.storage, id)?;

    if proposal.executed {
        return Err(ContractError::ProposalAlreadyExecuted { id });
    }

    if proposal.approved {
        return Err(ContractError::ProposalAlreadyApproved { id });
    }

    PROPOSALS.save(
        deps.storage,
        &AdminProposal {
            approved: true,
            ..proposal
        },
    )?;

    Ok(Response::default().add_event(DomainEvent::AdminProposalApproved { id }))
}

// Approval is the owner-side gate; execution of an approved proposal is
// permissionless.
fn execute_admin_proposal(deps: DepsMut, id: u64) -> ContractResult {
    let proposal = PROPOSALS.load(deps.storage, id)?;

    if proposal.executed {
        return Err(ContractError::ProposalAlreadyExecuted { id });
    }

    if !proposal.approved {
        return Err(ContractError::ProposalNotApproved { id });
    }

    if ADMINS.is_admin(deps.storage, &proposal.proposed_admin) {
        return Err(ContractError::AlreadyAdmin {
            address: proposal.proposed_admin,
        });
    }

    ADMINS.add(deps.storage, &proposal.proposed_admin)?;

    let address = proposal.proposed_admin.clone();

    PROPOSALS.save(
        deps.storage,
        &AdminProposal {
            executed: true,
            ..proposal
        },
    )?;

    Ok(Response::default().add_event(DomainEvent::AdminProposalExecuted { id, address }))
}

fn transfer_ownership(deps: DepsMut, info: MessageInfo, new_owner: String) -> ContractResult {
    ensure_owner(deps.storage, &info.sender)?;

    let new_owner = validated(&deps, &new_owner)?;

    let ownership = OWNERSHIP.load(deps.storage)?;

    OWNERSHIP.save(
        deps.storage,
        &Ownership {
            pending_owner: Some(new_owner.clone()),
            ..ownership
        },
    )?;

    Ok(
        Response::default().add_event(DomainEvent::OwnershipTransferStarted {
            from: info.sender,
            to: new_owner,
        }),
    )
}

fn accept_ownership(deps: DepsMut, info: MessageInfo) -> ContractResult {
    let ownership = OWNERSHIP.load(deps.storage)?;

    let pending = match ownership.pending_owner.clone() {
        Some(pending) => pending,
        None => return Err(ContractError::NoPendingOwner {}),
    };

    if pending != info.sender {
        return Err(ContractError::Unauthorized {});
    }

    let previous = match ownership.owner {
        Some(owner) => owner,
        None => return Err(ContractError::NoPendingOwner {}),
    };

    OWNERSHIP.save(
        deps.storage,
        &Ownership {
            owner: Some(info.sender.clone()),
            pending_owner: None,
        },
    )?;

    Ok(
        Response::default().add_event(DomainEvent::OwnershipTransferred {
            from: previous,
            to: info.sender,
        }),
    )
}

fn renounce_ownership(deps: DepsMut, info: MessageInfo) -> ContractResult {
    ensure_owner(deps.storage, &info.sender)?;

    OWNERSHIP.save(
        deps.storage,
        &Ownership {
            owner: None,
            pending_owner: None,
        },
    )?;

    Ok(
        Response::default().add_event(DomainEvent::OwnershipRenounced {
            previous_owner: info.sender,
        }),
    )
}

fn update_config(deps: DepsMut, info: MessageInfo, config: RegistryConfig) -> ContractResult {
    ensure_owner(deps.storage, &info.sender)?;

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::default().add_event(DomainEvent::ConfigUpdated { config }))
}

fn withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    mut denoms: Vec<String>,
    to: Option<Addr>,
) -> ContractResult {
    ensure_owner(deps.storage, &info.sender)?;

    if GUARD.load(deps.storage)? {
        return Err(ContractError::ReentrancyDetected {});
    }

    GUARD.save(deps.storage, &true)?;

    let recipient = match to {
        Some(to) => deps
            .api
            .addr_validate(to.as_str())
            .map_err(|_| ContractError::InvalidAddress {
                reason: to.to_string(),
            })?,
        None => info.sender,
    };

    denoms.sort();
    denoms.dedup();

    let mut funds: Vec<Coin> = vec![];

    for denom in denoms {
        let balance = deps.querier.query_balance(&env.contract.address, &denom)?;

        if !balance.amount.is_zero() {
            funds.push(balance);
        }
    }

    if funds.is_empty() {
        return Err(ContractError::NothingToWithdraw {});
    }

    // state settled before the bank message runs
    GUARD.save(deps.storage, &false)?;

    Ok(Response::default()
        .add_message(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: funds.clone(),
        })
        .add_event(DomainEvent::FundsWithdrawn {
            to: recipient,
            funds,
        }))
}

fn ensure_readable(storage: &dyn Storage) -> StdResult<()> {
    if WRITE_ACCESS.load(storage)?.paused && !CONFIG.load(storage)?.readable_while_paused {
        return Err(StdError::generic_err("Registry is paused"));
    }

    Ok(())
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: RegistryQueryMsg) -> StdResult<Binary> {
    match msg {
        RegistryQueryMsg::Value {} => {
            ensure_readable(deps.storage)?;
            to_json_binary(&CURRENT.load(deps.storage)?.value)
        }
        RegistryQueryMsg::Info {} => {
            let current = CURRENT.load(deps.storage)?;
            let ownership = OWNERSHIP.load(deps.storage)?;
            let access = WRITE_ACCESS.load(deps.storage)?;
            let history_length = HISTORY.len(deps.storage)?;

            to_json_binary(&RegistryInfo {
                value: current.value,
                updated_at: current.updated_at,
                owner: ownership.owner,
                pending_owner: ownership.pending_owner,
                paused: access.paused,
                lock_until: access.lock_until,
                update_count: history_length.saturating_sub(1),
                admin_count: ADMINS.count(deps.storage)?,
                history_length,
            })
        }
        RegistryQueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        RegistryQueryMsg::HistoryEntry { index } => {
            to_json_binary(&HISTORY.load(deps.storage, index)?)
        }
        RegistryQueryMsg::History { offset, limit } => {
            to_json_binary(&HISTORY.page(deps.storage, offset, limit)?)
        }
        RegistryQueryMsg::Admins { start_after, limit } => {
            to_json_binary(&ADMINS.page(deps.storage, start_after, limit)?)
        }
        RegistryQueryMsg::Proposals { start_after, limit } => {
            to_json_binary(&PROPOSALS.page(deps.storage, start_after, limit)?)
        }
    }
}

#[cfg(test)]
fn default_instantiate_msg() -> RegistryInstantiateMsg {
    RegistryInstantiateMsg {
        value: "genesis".to_string(),
        note: Some("seed".to_string()),
        admins: vec![],
        config: None,
    }
}
