//! Integration tests for the configuration system

mod config_integration;
