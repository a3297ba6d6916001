pub mod principal;

pub use principal::InMemoryCredentialStore;
