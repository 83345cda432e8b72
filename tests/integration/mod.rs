//! Integration tests for the agent factory

mod factory_service;
mod record_stores;
mod support;
mod tool_server;
