//! Core scanning logic

pub mod auth;
pub mod coordinator;
pub mod error;
pub mod outcome;
pub mod scanner;
pub mod types;
