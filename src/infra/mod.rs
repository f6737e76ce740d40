pub mod app_config;
pub mod datasource;
pub mod query_runner;
pub mod rich_history;
pub mod time_range;
pub mod url_state;
