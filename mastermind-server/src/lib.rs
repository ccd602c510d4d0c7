// Library exports for mastermind-server
// The CLI drives the same generator and store through these modules

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod generator;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod views;
