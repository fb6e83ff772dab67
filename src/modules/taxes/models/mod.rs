mod tax;

pub use tax::{TaxPolicy, TaxTier};
