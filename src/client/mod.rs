// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search engine client seam.
//!
//! - [`SearchClient`]: the transport contract the service talks to
//! - [`InMemorySearchClient`]: document store for development and tests

pub mod traits;
pub mod memory;

pub use traits::{SearchClient, SearchError};
pub use memory::InMemorySearchClient;
