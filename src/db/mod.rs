//! Database module: content tables behind a single actor.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `seed.rs`: default homepage content for empty tables
//! - `models.rs`: Rust structs mirroring DB rows
//! - `table.rs`: table/column whitelist and generic SELECT building
//! - `patch.rs` / `patch_impl.rs`: partial updates of single rows
//! - `actor.rs`: the `DbActor` owning the pool, plus its cloneable handle

pub mod actor;
pub mod models;
pub mod patch;
pub mod schema;
pub mod seed;
pub mod table;

mod patch_impl;

pub use actor::{DbActorHandle, spawn};
pub use models::{
    AccessPass, ContentRow, MembershipFeature, MembershipPlan, MembershipSection, PassFeature,
    PassWithFeatures, PersonalizationFeature, SocialPost, TableRows,
};
pub use patch::{AccessPassPatch, ContentPatch, DbPatchable};
pub use schema::SQLITE_INIT;
pub use table::{SelectQuery, SortSpec, Table};
