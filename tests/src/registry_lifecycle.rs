use cosmwasm_std::Coin;
use registry_rs::{
    core::ContractError,
    registry::{RegistryConfig, RegistryExecuteMsg, RegistryInstantiateMsg},
};

use crate::harness::RegistryTestApp;

#[test]
fn value_history_and_revert_flow() {
    let mut harness = RegistryTestApp::setup();
    let owner = harness.owner.clone();

    harness.set_value(&owner, "v1").unwrap();
    harness.set_value(&owner, "v2").unwrap();

    assert_eq!(harness.value(), "v2");

    harness
        .execute(
            &owner,
            &RegistryExecuteMsg::RevertTo {
                index: 0,
                note: Some("rollback".to_string()),
            },
        )
        .unwrap();

    assert_eq!(harness.value(), "genesis");

    let history = harness.history();

    assert_eq!(history.len(), 4);
    assert_eq!(history[3].value, "genesis");
    assert_eq!(history[3].note, Some("rollback".to_string()));

    let info = harness.info();

    assert_eq!(info.update_count, 3);
    assert_eq!(info.history_length, 4);
}

#[test]
fn pause_blocks_writes_until_unpaused() {
    let mut harness = RegistryTestApp::setup();
    let owner = harness.owner.clone();

    harness
        .execute(&owner, &RegistryExecuteMsg::Pause {})
        .unwrap();

    let err = harness
        .set_value(&owner, "blocked")
        .unwrap_err()
        .downcast::<ContractError>()
        .unwrap();

    assert_eq!(err, ContractError::ContractPaused {});
    assert!(harness.info().paused);

    harness
        .execute(&owner, &RegistryExecuteMsg::Unpause {})
        .unwrap();

    harness.set_value(&owner, "unblocked").unwrap();

    assert_eq!(harness.value(), "unblocked");
}

#[test]
fn lock_expires_with_block_time() {
    let mut harness = RegistryTestApp::setup();
    let owner = harness.owner.clone();

    harness
        .execute(&owner, &RegistryExecuteMsg::Lock { duration: 100 })
        .unwrap();

    let until = harness.app.block_info().time.plus_seconds(100);

    let err = harness
        .set_value(&owner, "locked-out")
        .unwrap_err()
        .downcast::<ContractError>()
        .unwrap();

    assert_eq!(err, ContractError::AttributeLocked { until });

    harness.advance_time(101);

    harness.set_value(&owner, "unlocked").unwrap();

    assert_eq!(harness.value(), "unlocked");
}

#[test]
fn rate_limit_spans_blocks() {
    let mut harness = RegistryTestApp::setup_with(RegistryInstantiateMsg {
        value: "genesis".to_string(),
        note: None,
        admins: vec![],
        config: Some(RegistryConfig {
            min_update_interval: Some(60),
            ..RegistryConfig::default()
        }),
    });
    let owner = harness.owner.clone();

    harness.set_value(&owner, "first").unwrap();

    let retry_at = harness.app.block_info().time.plus_seconds(60);

    let err = harness
        .set_value(&owner, "second")
        .unwrap_err()
        .downcast::<ContractError>()
        .unwrap();

    assert_eq!(err, ContractError::RateLimited { retry_at });

    harness.advance_time(60);

    harness.set_value(&owner, "second").unwrap();

    assert_eq!(harness.value(), "second");
}

#[test]
fn two_step_ownership_transfer() {
    let mut harness = RegistryTestApp::setup();
    let owner = harness.owner.clone();
    let next = harness.app.api().addr_make("next");

    harness
        .execute(
            &owner,
            &RegistryExecuteMsg::TransferOwnership {
                new_owner: next.to_string(),
            },
        )
        .unwrap();

    // still the old owner's registry until the handover is accepted
    assert_eq!(harness.info().owner, Some(owner.clone()));

    harness
        .execute(&next, &RegistryExecuteMsg::AcceptOwnership {})
        .unwrap();

    assert_eq!(harness.info().owner, Some(next.clone()));

    let err = harness
        .execute(&owner, &RegistryExecuteMsg::Pause {})
        .unwrap_err()
        .downcast::<ContractError>()
        .unwrap();

    assert_eq!(err, ContractError::Unauthorized {});

    harness
        .execute(&next, &RegistryExecuteMsg::Pause {})
        .unwrap();

    assert!(harness.info().paused);
}

#[test]
fn admin_proposal_grants_write_access() {
    let mut harness = RegistryTestApp::setup();
    let owner = harness.owner.clone();
    let candidate = harness.app.api().addr_make("candidate");
    let executor = harness.app.api().addr_make("executor");

    harness
        .execute(
            &owner,
            &RegistryExecuteMsg::ProposeAdmin {
                address: candidate.to_string(),
            },
        )
        .unwrap();

    harness
        .execute(&owner, &RegistryExecuteMsg::ApproveAdmin { id: 1 })
        .unwrap();

    harness
        .execute(&executor, &RegistryExecuteMsg::ExecuteAdminProposal { id: 1 })
        .unwrap();

    harness.set_value(&candidate, "from-new-admin").unwrap();

    assert_eq!(harness.value(), "from-new-admin");
    assert_eq!(harness.info().admin_count, 1);
}

#[test]
fn withdraw_rescues_stranded_funds() {
    let mut harness = RegistryTestApp::setup();
    let owner = harness.owner.clone();

    harness.fund_registry(vec![Coin::new(1000_u128, "rune")]);

    harness
        .execute(
            &owner,
            &RegistryExecuteMsg::Withdraw {
                denoms: vec!["rune".to_string()],
                to: None,
            },
        )
        .unwrap();

    let owner_balance = harness.app.wrap().query_balance(&owner, "rune").unwrap();
    let contract_balance = harness
        .app
        .wrap()
        .query_balance(&harness.registry_addr, "rune")
        .unwrap();

    assert_eq!(owner_balance, Coin::new(1000_u128, "rune"));
    assert!(contract_balance.amount.is_zero());
}

#[test]
fn removed_entries_stay_visible_in_pages() {
    let mut harness = RegistryTestApp::setup();
    let owner = harness.owner.clone();

    harness.set_value(&owner, "v1").unwrap();

    harness
        .execute(&owner, &RegistryExecuteMsg::RemoveHistoryEntry { index: 0 })
        .unwrap();

    let history = harness.history();

    assert_eq!(history.len(), 2);
    assert!(history[0].removed);
    assert!(!history[1].removed);

    let err = harness
        .execute(
            &owner,
            &RegistryExecuteMsg::RevertTo {
                index: 0,
                note: None,
            },
        )
        .unwrap_err()
        .downcast::<ContractError>()
        .unwrap();

    assert_eq!(err, ContractError::EntryRemoved { index: 0 });
}
