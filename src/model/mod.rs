//! Document model types for linked page content.
//!
//! This module defines the intermediate representation (IR) that bridges
//! raw layout extraction and chunk assembly. All types serialize with
//! serde; the JSON form of [`DocumentStructure`] is the persisted contract
//! between the linking phase and the chunk assembler.

mod chunk;
mod document;
mod object;
mod page;
mod paragraph;

pub use chunk::{Chunk, ChunkKind};
pub use document::{document_id_from_bytes, DocumentStructure};
pub use object::{Caption, CaptionKind, ImageObject, TableObject};
pub use page::{Block, PageStructure};
pub use paragraph::Paragraph;
