//! # portfolio-service
//!
//! Application layer containing the reaction ledger, post management and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    spawn_reconciler, PostService, ReactionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
