//! Clinic Router - Pediatric referral routing with clinician feedback
//!
//! This crate routes a referral's age, primary concern and clinical
//! indicators to one of three specialty clinics through a priority cascade
//! of rules, and records clinician agreement or corrections in a
//! per-session ledger that can be summarized and exported.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
