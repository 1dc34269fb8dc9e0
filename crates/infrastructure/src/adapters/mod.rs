//! Adapters implementing application ports against external systems

mod compute_adapter;

pub use compute_adapter::ComputeAdapter;
