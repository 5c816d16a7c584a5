//! Browser end-to-end test suite for the Gateway web application.
//!
//! Scenarios drive a real browser (through a Node.js driver sidecar) across
//! Gateway's business workflows: login, client creation, KYC fact-find, and
//! the handoff into the external planning application. The pieces:
//!
//! - [`store`]: scenario-scoped keyed store threading values between
//!   independently constructed steps.
//! - [`resolve`]: label-to-element resolution across Gateway's coexisting
//!   page-layout conventions.
//! - [`alert`]: detection of whichever alert implementation a page renders.
//! - [`scenario`]: the step/orchestrator composition and the business steps.
//! - [`browser`]: the consumed automation capability surface and the real
//!   session behind it.

pub mod alert;
pub mod browser;
pub mod cli;
pub mod error;
pub mod report;
pub mod resolve;
pub mod scenario;
pub mod store;

pub use error::GatewayError;
