pub mod app;
pub mod components;
pub mod i18n;
pub mod registry;

pub use app::App;
pub use i18n::{MessageCatalog, MessageDescriptor};
pub use registry::{BlockEntry, BlockProps, BlockRegistry, SharedGrammars};
