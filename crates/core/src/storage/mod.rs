pub mod kv;
pub mod ledger_store;
