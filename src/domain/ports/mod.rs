mod snapshot_port;

pub use snapshot_port::ChatSnapshot;
