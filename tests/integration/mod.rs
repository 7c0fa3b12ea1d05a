//! Integration tests module
//!
//! This module organizes the dispatcher tests by user journey

pub mod create_and_play_test;
pub mod failure_test;
pub mod protocol_test;
