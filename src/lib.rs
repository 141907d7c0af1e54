//! # Vault Bootstrap
//!
//! A bootstrap orchestrator for a HashiCorp Vault instance: waits for Vault
//! to become reachable, determines its lifecycle state via the health
//! endpoint, performs one-time initialisation when the instance has never
//! been initialised, and hands the resulting root token to an
//! encrypt-and-store pipeline before going dormant.
//!
//! ## Overview
//!
//! 1. **Health polling** — `HEAD /v1/sys/health` is retried indefinitely while
//!    Vault is unreachable; the status code classifies the lifecycle state
//! 2. **State-to-action mapping** — only a never-initialised Vault triggers
//!    the one-shot `PUT /v1/sys/init`; every other state goes dormant with an
//!    operator-facing explanation
//! 3. **Credential handoff** — the root token is encrypted under an AWS KMS
//!    key and the ciphertext uploaded to S3, named after the host
//! 4. **Coordinated shutdown** — SIGINT/SIGTERM cancel the poll loop
//!    cooperatively and unblock the final dormant wait point
//!
//! This tool assumes auto-unseal has been configured, so Vault becomes usable
//! immediately after initialisation without a manual unseal step.
//!
//! ## Usage
//!
//! See the [README.md](../README.md) for configuration and deployment notes.

pub mod config;
pub mod constants;
pub mod error;
pub mod handoff;
pub mod orchestrator;
pub mod runtime;
pub mod shutdown;
pub mod vault;
