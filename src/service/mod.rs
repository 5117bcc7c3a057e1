pub mod directory;
pub mod report;
pub mod upsert;
