//! I/O module for reading and writing IDF layout files

pub mod idf;

pub use idf::{new_board_file, parse, serialize, IdfReader, IdfReaderConfiguration, IdfWriter};
