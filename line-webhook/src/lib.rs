//! Shared building blocks for the LINE webhook lambdas:
//! environment configuration, JSON logging and parsing, API Gateway helpers and a minimal
//! LINE Messaging API client.

pub mod config;
pub mod gateway;
pub mod json;
pub mod line;
pub mod logging;
