//! Clients for remote data sources.

mod users_api;

pub use users_api::{RemoteSource, UsersApiClient};

#[cfg(any(test, feature = "test-utils"))]
pub use users_api::MockRemoteSource;
