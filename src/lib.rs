//! # Konto (Account Management & Authentication)
//!
//! `konto` is a small account management service. It handles user registration,
//! password login, and admin-moderated account activation.
//!
//! ## Account Lifecycle
//!
//! Accounts carry a status (`pending`, `active`, `disabled`). New registrations
//! start as `pending` unless the caller asks otherwise, and only `active`
//! accounts can log in:
//!
//! - **`pending`**: registered but waiting for an admin to approve.
//! - **`active`**: full access, may log in and manage its own profile.
//! - **`disabled`**: locked out until an admin re-activates it.
//!
//! Status gating happens before the password is checked, so a pending or
//! disabled account gets the same answer whether or not the password matches.
//!
//! ## Authentication
//!
//! Passwords are stored as `Argon2id` hashes in `PostgreSQL`; plaintext never
//! touches the database. A successful login returns a signed bearer token
//! (`HS256`, 1 hour) whose subject is the account id. Self-service endpoints
//! require the token; verification is offline, no database lookup involved.

pub mod auth;
pub mod cli;
pub mod konto;
