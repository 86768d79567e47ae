//! System assembly: the paged bus, the console that owns the CPU, and the
//! save-state orchestrator.

pub mod bus;
pub mod console;
pub mod savestate;

pub use bus::{PageAccess, PageOwner, PageTable, System, ADDRESS_SPACE_BITS, PAGE_BITS};
pub use console::Console;
pub use savestate::{STATE_TAG, STATE_VERSION};
