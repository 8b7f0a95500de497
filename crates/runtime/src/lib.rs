//! LCU Runtime - process discovery and credential extraction
//!
//! This crate finds a locally running League Client UX (LCU) and reads the
//! connection secrets it was launched with:
//!
//! - **Credentials**: parsing `--app-port` / `--remoting-auth-token` out of a command line
//! - **Process**: scanning the process table for the LCU (first match wins)
//! - **Descriptor**: the immutable `(pid, port, token)` result of a discovery
//!
//! Nothing here is async or stateful beyond the process table cache; the
//! session lifecycle built on top lives in the `lcu` crate.

pub mod credentials;
pub mod descriptor;
pub mod error;
pub mod process;

pub use credentials::{AUTH_TOKEN_FLAG, Credentials, PORT_FLAG, extract};
pub use descriptor::ConnectionDescriptor;
pub use error::{Error, Result};
pub use process::{LCU_PROCESS_NAME, ProcessEntry, ProcessLocator, ProcessSource, SystemProcesses};
