//! nettakip-store — the record-store boundary.
//!
//! Implements the `RecordStore` trait against Supabase's PostgREST API, and
//! provides an in-memory store for tests and offline use. The store is a
//! plain create/read/delete record keeper: no transactions, no migrations,
//! no conflict resolution.

pub mod memory;
pub mod rows;
pub mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;
