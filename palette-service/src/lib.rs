//! palette-service: turns a business brief into a color palette by prompting
//! a hosted language model and validating its reply.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
