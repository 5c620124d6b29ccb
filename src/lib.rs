//! Cardio Intake - Conversational Heart-Disease Risk Questionnaire
//!
//! This crate collects eleven clinical answers through a step-by-step chat,
//! validates each one, and scores the completed record with an external
//! risk classifier.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
