// src/command/flags.rs

use bitflags::bitflags;

bitflags! {
    /// Properties a script author can set on a command.
    ///
    /// Flags are consumer-set configuration: the engine and the console
    /// logger read them, backends never interpret them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CommandFlags: u32 {
        /// Standard command, no special properties.
        const STANDARD = 0x0;
        /// The command's trigger condition has not been met; it is
        /// synthesized as skipped instead of being executed.
        const INACTIVE = 0x1;
        /// Teardown command: bypasses the error-handler gate and runs even
        /// while an abort is unwinding.
        const CLEANUP = 0x2;
        /// Suppress streamed console echo; header/footer still print and
        /// output is still captured.
        const QUIET = 0x4;
        /// Suppress all console output for this command; output is still
        /// captured.
        const NO_CONSOLE = 0x8;
    }
}
