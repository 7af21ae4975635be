/// Life-cycle of the firmware.
///
/// `Initializing` covers the one-time bring-up; `Running` is entered once the
/// blink loop starts and is never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemState {
    Initializing,
    Running,
}

impl SystemState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemState::Initializing => "Initializing",
            SystemState::Running => "Running",
        }
    }
}
