use cosmwasm_schema::write_api;
use registry_rs::registry::{RegistryExecuteMsg, RegistryInstantiateMsg, RegistryQueryMsg};

fn main() {
    write_api! {
        instantiate: RegistryInstantiateMsg,
        execute: RegistryExecuteMsg,
        query: RegistryQueryMsg,
    }
}
