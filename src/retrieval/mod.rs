//! Two-phase retrieval against NCBI E-utilities
//!
//! Phase one ([`RetrievalClient::resolve_ids`]) resolves a query term to
//! PMIDs with ESearch; phase two ([`RetrievalClient::fetch_details`]) fetches
//! the records for those PMIDs with a single EFetch call.

mod client;
mod responses;

pub use client::{MAX_RESULTS_LIMIT, ResolvedIds, RetrievalClient};
