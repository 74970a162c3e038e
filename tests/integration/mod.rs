//! Integration Tests Module
//!
//! End-to-end tests for the mock interview engine: session flow and the end
//! protocol, feedback parsing and fallback, and the completion client over
//! HTTP.

// Scripted provider, HTTP stub and session builders
mod support;

// Interview session turn flow and end protocol
mod interview_session_test;

// Scorecard generation and validation
mod feedback_test;

// Completion client against a local HTTP endpoint
mod completion_client_test;
