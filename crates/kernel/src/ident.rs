/// Name reported in the boot banner.
pub const K_KERNEL_NAME: &str = "TinyBlink";

/// Version reported in the boot banner.
pub const K_KERNEL_VERSION: &str = env!("CARGO_PKG_VERSION");
