pub mod harness;

#[cfg(test)]
mod registry_lifecycle;
