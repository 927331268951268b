use std::cmp::min;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Empty, Order, StdResult, Storage, Timestamp};
use cw_storage_plus::{Bound, Item, Map};
use registry_rs::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    registry::{AdminProposal, HistoryEntry, RegistryConfig},
};

pub const CONFIG: Item<RegistryConfig> = Item::new("config");

#[cw_serde]
pub struct Ownership {
    /// None only after an explicit, irreversible renouncement.
    pub owner: Option<Addr>,
    pub pending_owner: Option<Addr>,
}

pub const OWNERSHIP: Item<Ownership> = Item::new("ownership");

#[cw_serde]
pub struct WriteAccess {
    pub paused: bool,
    /// Expiry is evaluated lazily against block time at call time.
    pub lock_until: Option<Timestamp>,
    pub last_update: Option<Timestamp>,
}

pub const WRITE_ACCESS: Item<WriteAccess> = Item::new("write_access");

#[cw_serde]
pub struct CurrentValue {
    pub value: String,
    pub checksum: Binary,
    pub updated_at: Timestamp,
}

pub const CURRENT: Item<CurrentValue> = Item::new("current_value");

pub const GUARD: Item<bool> = Item::new("reentrancy_guard");

/// Append-only audit trail. Indices are dense, 0-based, and permanent;
/// "deletion" only flips the tombstone flag on an entry.
pub struct HistoryStore {
    entries: Map<u64, HistoryEntry>,
    length: Item<u64>,
}

impl HistoryStore {
    pub fn len(&self, storage: &dyn Storage) -> StdResult<u64> {
        Ok(self.length.may_load(storage)?.unwrap_or_default())
    }

    pub fn append(
        &self,
        storage: &mut dyn Storage,
        value: String,
        checksum: Binary,
        updater: Addr,
        timestamp: Timestamp,
        note: Option<String>,
    ) -> StdResult<HistoryEntry> {
        let index = self.len(storage)?;

        let entry = HistoryEntry {
            index,
            value,
            checksum,
            updater,
            timestamp,
            note,
            removed: false,
        };

        self.entries.save(storage, index, &entry)?;
        self.length.save(storage, &(index + 1))?;

        Ok(entry)
    }

    pub fn load(&self, storage: &dyn Storage, index: u64) -> StdResult<HistoryEntry> {
        self.entries.load(storage, index)
    }

    pub fn set_removed(
        &self,
        storage: &mut dyn Storage,
        index: u64,
        removed: bool,
    ) -> StdResult<HistoryEntry> {
        let entry = HistoryEntry {
            removed,
            ..self.entries.load(storage, index)?
        };

        self.entries.save(storage, index, &entry)?;

        Ok(entry)
    }

    pub fn page(
        &self,
        storage: &dyn Storage,
        offset: Option<u64>,
        limit: Option<u16>,
    ) -> StdResult<Vec<HistoryEntry>> {
        self.entries
            .range(
                storage,
                offset.map(Bound::inclusive),
                None,
                Order::Ascending,
            )
            .take(clamped_limit(limit))
            .map(|r| r.map(|(_, entry)| entry))
            .collect()
    }
}

pub const HISTORY: HistoryStore = HistoryStore {
    entries: Map::new("history_v1"),
    length: Item::new("history_v1__length"),
};

pub struct AdminStore {
    members: Map<Addr, Empty>,
    count: Item<u64>,
}

impl AdminStore {
    pub fn is_admin(&self, storage: &dyn Storage, address: &Addr) -> bool {
        self.members.has(storage, address.clone())
    }

    /// Returns false when the address was already a member.
    pub fn add(&self, storage: &mut dyn Storage, address: &Addr) -> StdResult<bool> {
        if self.is_admin(storage, address) {
            return Ok(false);
        }

        let count = self.count(storage)?;

        self.members.save(storage, address.clone(), &Empty {})?;
        self.count.save(storage, &(count + 1))?;

        Ok(true)
    }

    /// Returns false when the address was not a member.
    pub fn remove(&self, storage: &mut dyn Storage, address: &Addr) -> StdResult<bool> {
        if !self.is_admin(storage, address) {
            return Ok(false);
        }

        let count = self.count(storage)?;

        self.members.remove(storage, address.clone());
        self.count.save(storage, &count.saturating_sub(1))?;

        Ok(true)
    }

    pub fn count(&self, storage: &dyn Storage) -> StdResult<u64> {
        Ok(self.count.may_load(storage)?.unwrap_or_default())
    }

    pub fn page(
        &self,
        storage: &dyn Storage,
        start_after: Option<Addr>,
        limit: Option<u16>,
    ) -> StdResult<Vec<Addr>> {
        self.members
            .keys(
                storage,
                start_after.map(Bound::exclusive),
                None,
                Order::Ascending,
            )
            .take(clamped_limit(limit))
            .collect()
    }
}

pub const ADMINS: AdminStore = AdminStore {
    members: Map::new("admins_v1"),
    count: Item::new("admins_v1__count"),
};

pub struct ProposalStore {
    proposals: Map<u64, AdminProposal>,
    counter: Item<u64>,
}

impl ProposalStore {
    pub fn create(
        &self,
        storage: &mut dyn Storage,
        proposed_admin: Addr,
        proposer: Addr,
        timestamp: Timestamp,
    ) -> StdResult<AdminProposal> {
        let id = self.counter.may_load(storage)?.unwrap_or_default() + 1;

        let proposal = AdminProposal {
            id,
            proposed_admin,
            proposer,
            timestamp,
            approved: false,
            executed: false,
        };

        self.proposals.save(storage, id, &proposal)?;
        self.counter.save(storage, &id)?;

        Ok(proposal)
    }

    pub fn load(&self, storage: &dyn Storage, id: u64) -> StdResult<AdminProposal> {
        self.proposals.load(storage, id)
    }

    pub fn save(&self, storage: &mut dyn Storage, proposal: &AdminProposal) -> StdResult<()> {
        self.proposals.save(storage, proposal.id, proposal)
    }

    pub fn page(
        &self,
        storage: &dyn Storage,
        start_after: Option<u64>,
        limit: Option<u16>,
    ) -> StdResult<Vec<AdminProposal>> {
        self.proposals
            .range(
                storage,
                start_after.map(Bound::exclusive),
                None,
                Order::Ascending,
            )
            .take(clamped_limit(limit))
            .map(|r| r.map(|(_, proposal)| proposal))
            .collect()
    }
}

pub const PROPOSALS: ProposalStore = ProposalStore {
    proposals: Map::new("admin_proposals_v1"),
    counter: Item::new("admin_proposals_v1__counter"),
};

fn clamped_limit(limit: Option<u16>) -> usize {
    limit.map_or(DEFAULT_PAGE_SIZE, |l| min(l as usize, MAX_PAGE_SIZE))
}
