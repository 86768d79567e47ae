//! # Atari 2600 (VCS) machine core
//!
//! A headless emulation of the Atari 2600: the 6507 CPU (via `lib6507`), a
//! paged memory bus with direct-access fast paths, the TIA audio
//! register-to-sample pipeline, the 6532 RIOT, and the cartridge
//! bankswitching family.
//!
//! The machine is assembled by [`Console`]: the CPU owns the [`System`]
//! bus, and the bus owns the devices. There is no host video or audio I/O
//! in this crate; the TIA video pipeline, ROM loading, and input handling
//! live with external collaborators, and audio is pulled by the host
//! through [`sound::Sound::process_fragment`].
//!
//! ## Quick Start
//!
//! ```rust
//! use vcs_emu::devices::cart::{create, CartridgeKind};
//! use vcs_emu::settings::Settings;
//! use vcs_emu::system::Console;
//!
//! // A 4K image whose reset vector points at $F000
//! let mut image = vec![0xEA; 4096]; // NOPs
//! image[0xFFC] = 0x00;
//! image[0xFFD] = 0xF0;
//!
//! let cart = create(CartridgeKind::FourK, image).unwrap();
//! let mut console = Console::new(cart, &Settings::default());
//! console.reset();
//!
//! assert!(console.execute(100));
//! assert_eq!(console.system().cycles(), 200); // NOP costs 2 cycles
//! ```

pub mod devices;
pub mod random;
pub mod serializer;
pub mod settings;
pub mod sound;
pub mod system;

pub use random::Random;
pub use serializer::{Deserializer, Serializer, StateError};
pub use settings::Settings;
pub use system::{Console, PageAccess, PageOwner, PageTable, System};
