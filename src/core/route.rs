mod health;
mod ingest;

pub use health::handle_health;
pub use ingest::handle_ingest;
