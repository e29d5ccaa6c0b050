pub(crate) mod database;
pub(crate) mod generator;
pub(crate) mod jwt;
pub(crate) mod logging;
pub(crate) mod settings;
