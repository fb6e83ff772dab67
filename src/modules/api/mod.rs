pub mod services;

pub use services::{BookkeepingApi, HttpBookkeepingApi};
