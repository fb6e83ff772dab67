pub mod stock_ledger;

pub use stock_ledger::StockLedger;
