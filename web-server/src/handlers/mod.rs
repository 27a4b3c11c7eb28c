//! HTTP handlers

pub mod health;
pub mod options;
pub mod pages;
pub mod predict;
