pub mod assembler;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod error;
pub mod image;
pub mod instructions;
pub mod operands;
pub mod registers;

pub use assembler::{assemble, assemble_line, assemble_source, Assembly, Diagnostic};
pub use encoder::{encode, MachineWord};
pub use error::AsmError;
pub use image::{read_image, render_image, write_image, ImageLayout, Slot};
pub use instructions::{lookup, Format, InstrSpec};
