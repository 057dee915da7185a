pub mod error;
pub mod ledger;
pub mod service;
pub mod transition;

#[cfg(test)]
pub mod tests;
