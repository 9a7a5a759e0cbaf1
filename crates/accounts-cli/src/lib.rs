//! # Accounts CLI
//!
//! Administrative tasks for the accounts service.
//!
//! The binary handles prompting and database setup; the work itself lives here
//! so it can run against any [`UserRepository`](accounts_db::UserRepository).
//!
//! ```ignore
//! use accounts_cli::superuser::create_superuser;
//!
//! let admin = create_superuser(&repo, "root@example.com", "s3cretpassw0rd", false).await?;
//! ```

pub mod superuser;
