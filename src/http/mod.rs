//! HTTP transport surface
//!
//! Carries decoded JSON-RPC payloads between remote callers and the
//! protocol engine, plus the process metadata endpoints.

pub mod handlers;
