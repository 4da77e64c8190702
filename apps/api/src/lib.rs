//! Skiller: skill and seniority extraction from job-posting descriptions.

pub mod annotation;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod routes;
pub mod state;
