//! CLI command implementations.
//!
//! | Module     | Commands handled        |
//! |------------|-------------------------|
//! | `run`      | `Run`, no subcommand    |
//! | `validate` | `Validate`              |
//! | `resolve`  | `Resolve`               |

pub mod resolve;
pub mod run;
pub mod validate;

pub use resolve::cmd_resolve;
pub use run::cmd_run;
pub use validate::cmd_validate;
