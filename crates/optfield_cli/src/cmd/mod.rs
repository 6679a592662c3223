/// Field presence report command.
pub mod inspect;
/// Patch-onto-base merge command.
pub mod merge;

mod util;
