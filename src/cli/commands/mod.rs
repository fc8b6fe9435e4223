mod init;
mod stats;

pub use init::cmd_init;
pub use stats::cmd_stats;
