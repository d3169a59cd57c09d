// src/core/frontmatter.rs
mod parser;
mod validation;

pub use parser::{DELIMITER, Feed, FrontmatterParser, Header, ParserState, RawFrontmatter, Resolved};
pub use validation::{FrontmatterError, parse_date, validate_frontmatter};
