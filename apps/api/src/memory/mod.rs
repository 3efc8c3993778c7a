// Document Store — persistence and similarity search over uploaded documents.
// The store owns all Document rows; no other module mutates them.

pub mod chunking;
pub mod handlers;
pub mod store;
