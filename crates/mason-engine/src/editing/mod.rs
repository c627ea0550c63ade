/*!
 * Editing core: command-based mutation of the block document.
 *
 * All edits are represented as concrete, identity-targeted commands
 * ([`Cmd`]) and funnel through [`Document::apply`], which returns a
 * [`Patch`] describing what changed. The UI layer renders from the
 * document and never mutates block nodes directly.
 *
 * Commands never fail: a command whose target is gone, or whose target
 * fails the variant predicate (e.g. a language change aimed at a
 * non-code block), applies as a no-op. The document stays valid
 * throughout: at least one block, every block at least one text child.
 *
 * Module structure:
 *
 * - **`document`**: [`Document`] with the block list, caret and version counter
 * - **`commands`**: the [`Cmd`] enum
 * - **`patch`**: [`Patch`], edit result metadata for the UI
 * - **`enter_key`**: the shared press-Enter-twice-to-exit policy for
 *   fenced-style blocks
 */

pub mod commands;
pub mod document;
pub mod enter_key;
pub mod patch;

pub use commands::Cmd;
pub use document::{Caret, Document, DocumentError};
pub use enter_key::press_enter_twice_to_exit;
pub use patch::Patch;
