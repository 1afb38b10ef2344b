//! Core types and definitions for the DARTRUN attacker.
//!
//! This crate defines the vocabulary shared across all other crates:
//! tuning, commands, state snapshots, audio cues, and constants.
//! It has no dependency on any renderer or runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
