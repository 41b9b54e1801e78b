pub mod config;
pub mod github;
pub mod history;
pub mod report;
pub mod stats;
pub mod tracker;
pub mod version;
