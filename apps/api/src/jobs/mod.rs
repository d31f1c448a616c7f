// Background analysis jobs: in-memory status store plus the worker that
// extracts, analyzes and records each upload.

pub mod handlers;
pub mod store;
pub mod worker;

pub use store::JobStore;
