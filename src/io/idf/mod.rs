//! IDF 3.0 board files: reading, writing and blank board templates

mod format;
mod reader;
pub(crate) mod section;
mod template;
mod tokenizer;
mod writer;

pub use format::format_number;
pub use reader::{parse, IdfReader, IdfReaderConfiguration};
pub use section::LineEnding;
pub use template::{new_board_file, SOURCE_SYSTEM};
pub use writer::{serialize, IdfWriter};
