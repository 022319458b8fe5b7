// Library for tests to access modules

pub mod collectors;
pub mod config;
pub mod docker_repo;
pub mod error;
pub mod models;
pub mod routes;
pub mod sources;
pub mod sysinfo_repo;
pub mod version;
