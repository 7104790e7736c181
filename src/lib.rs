//! # Shulebase API
//!
//! A school administration backend built with Rust, Axum, and PostgreSQL.
//! It serves two frontends: an admin dashboard for staff and a separate
//! student portal.
//!
//! ## Overview
//!
//! - **Identity reconciliation**: staff authenticate against an external
//!   identity provider; every request joins the verified external identity
//!   with the local authorization record. Role is sourced from the database,
//!   never from provider claims, and the first account ever created becomes
//!   the permanent SUPER_ADMIN.
//! - **Role-based access control**: a single evaluator gates every
//!   privileged operation, including the role-mutation rules that keep
//!   SUPER_ADMIN immutable and admins constrained to lower roles.
//! - **Student portal**: an independent credential system keyed on
//!   admission numbers, with an onboarding/activation state machine and
//!   signed session tokens that are re-checked against live state.
//! - **Library circulation**: borrow/return as a transactional state
//!   machine with inventory-consistent accounting; overdue is derived at
//!   read time.
//! - **Audit log**: append-only record of sensitive administrative actions,
//!   written after the main effect commits.
//!
//! ## Architecture
//!
//! The codebase follows a modular architecture inspired by NestJS:
//!
//! ```text
//! src/
//! ├── config/           # Configuration modules (database, identity, JWT, CORS)
//! ├── middleware/       # Auth extractors and the role evaluator
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Identity reconciliation
//! │   ├── users/       # Staff roles and subroles
//! │   ├── config/      # Global configuration singleton
//! │   ├── classes/     # Class records
//! │   ├── streams/     # Stream records
//! │   ├── students/    # Student administration
//! │   ├── student_auth/# Student portal authenticator
//! │   ├── books/       # Library catalog
//! │   ├── circulation/ # Borrow/return engine
//! │   └── logs/        # Audit log
//! └── utils/           # Shared utilities
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers (routes)
//! - `service.rs`: Business logic
//! - `model.rs`: Data models, DTOs, database structs
//! - `router.rs`: Axum router configuration
//!
//! ## Security Considerations
//!
//! - Student passwords are hashed with bcrypt; session tokens never carry
//!   the hash and die with an administrative account reset.
//! - SUPER_ADMIN exists only by account genesis and cannot be granted or
//!   revoked through the API.
//! - Registration can be closed via the global configuration; the first
//!   account is always admitted.
//! - The dev bypass token only works with `APP_ENV=dev`.

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
