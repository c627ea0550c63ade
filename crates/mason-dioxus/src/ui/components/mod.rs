pub mod blocks_editor;
pub mod code_block;
pub mod editor_area;
pub mod heading;
pub mod paragraph;
pub mod quote;
pub mod toolbar;

pub use blocks_editor::BlocksEditor;
pub use code_block::CodeBlock;
pub use editor_area::EditorArea;
pub use heading::Heading;
pub use paragraph::Paragraph;
pub use quote::Quote;
pub use toolbar::Toolbar;
