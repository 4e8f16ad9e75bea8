//! Supabase Client
//!
//! Typed access to the two Supabase surfaces this application uses:
//!
//! - PostgREST (`/rest/v1/{table}`) through [`SupabaseClient`] and the
//!   [`TableQuery`] builder
//! - GoTrue auth (`/auth/v1/...`) through [`AuthApi`]
//!
//! All requests carry the project `apikey` header; row access additionally
//! forwards the caller's bearer token so RLS policies apply.

pub mod auth;
pub mod client;
pub mod error;
pub mod query;

pub use auth::{AuthApi, AuthUser, Session, SignUpMetadata};
pub use client::{SupabaseClient, SupabaseConfig};
pub use error::{PostgrestErrorDetails, SupabaseError};
pub use query::{SortOrder, TableQuery};
