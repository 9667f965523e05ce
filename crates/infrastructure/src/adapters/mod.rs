//! Adapters implementing application ports against remote services

mod downstream_delay_adapter;
mod inventory_adapter;

pub use downstream_delay_adapter::HttpDownstreamDelayAdapter;
pub use inventory_adapter::HttpInventoryAdapter;

/// Service name used in errors about the inventory collaborator
pub const INVENTORY_SERVICE: &str = "inventory-svc";

fn unreachable(service: &str, err: &reqwest::Error) -> application::ApplicationError {
    application::ApplicationError::UpstreamUnreachable {
        service: service.to_string(),
        reason: err.to_string(),
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}
