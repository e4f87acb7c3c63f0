pub mod history;
pub mod record;
pub mod region;
pub mod summary;
pub mod table;
