use cosmwasm_std::{Addr, Coin};
use cw_multi_test::{
    error::AnyResult, App, AppResponse, BankSudo, ContractWrapper, Executor, SudoMsg,
};
use registry::contract::{execute, instantiate, query};
use registry_rs::registry::{
    HistoryEntry, RegistryExecuteMsg, RegistryInfo, RegistryInstantiateMsg, RegistryQueryMsg,
};

pub struct RegistryTestApp {
    pub app: App,
    pub owner: Addr,
    pub registry_addr: Addr,
}

impl RegistryTestApp {
    pub fn setup() -> Self {
        Self::setup_with(RegistryInstantiateMsg {
            value: "genesis".to_string(),
            note: None,
            admins: vec![],
            config: None,
        })
    }

    pub fn setup_with(msg: RegistryInstantiateMsg) -> Self {
        let mut app = App::default();

        let code_id = app.store_code(Box::new(ContractWrapper::new(execute, instantiate, query)));

        let owner = app.api().addr_make("owner");

        let registry_addr = app
            .instantiate_contract(code_id, owner.clone(), &msg, &[], "registry", None)
            .unwrap();

        Self {
            app,
            owner,
            registry_addr,
        }
    }

    pub fn execute(&mut self, sender: &Addr, msg: &RegistryExecuteMsg) -> AnyResult<AppResponse> {
        self.app
            .execute_contract(sender.clone(), self.registry_addr.clone(), msg, &[])
    }

    pub fn set_value(&mut self, sender: &Addr, value: &str) -> AnyResult<AppResponse> {
        self.execute(
            sender,
            &RegistryExecuteMsg::SetValue {
                value: value.to_string(),
                note: None,
            },
        )
    }

    pub fn value(&self) -> String {
        self.app
            .wrap()
            .query_wasm_smart(self.registry_addr.clone(), &RegistryQueryMsg::Value {})
            .unwrap()
    }

    pub fn info(&self) -> RegistryInfo {
        self.app
            .wrap()
            .query_wasm_smart(self.registry_addr.clone(), &RegistryQueryMsg::Info {})
            .unwrap()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.app
            .wrap()
            .query_wasm_smart(
                self.registry_addr.clone(),
                &RegistryQueryMsg::History {
                    offset: None,
                    limit: None,
                },
            )
            .unwrap()
    }

    pub fn advance_time(&mut self, seconds: u64) {
        self.app.update_block(|block| {
            block.time = block.time.plus_seconds(seconds);
            block.height += 1;
        });
    }

    pub fn fund_registry(&mut self, amount: Vec<Coin>) {
        self.app
            .sudo(SudoMsg::Bank(BankSudo::Mint {
                to_address: self.registry_addr.to_string(),
                amount,
            }))
            .unwrap();
    }
}
