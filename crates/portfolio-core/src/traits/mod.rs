//! Repository traits

mod repositories;

pub use repositories::{
    InsertOutcome, PostQuery, PostRepository, ReactionRepository, RepoResult,
};
