/*!
 * Page translation.
 *
 * - `core`: the `Translator` seam and the engine dispatching service
 * - `prompts`: prompt templates for chat based engines
 */

pub use self::core::{TranslationService, Translator};
pub use self::prompts::PromptTemplate;

pub mod core;
pub mod prompts;
