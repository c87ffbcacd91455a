// Provider API keys: an observable store with read / write / subscribe.

pub mod handlers;
pub mod keys;

pub use keys::{KeyChange, KeyStore, KeyStoreError, Provider};
