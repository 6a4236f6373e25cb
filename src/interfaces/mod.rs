//! Outer bindings of the application services

pub mod http;
