pub mod error;
pub mod ingest;
pub mod preview;
pub mod route;
pub mod tail;
