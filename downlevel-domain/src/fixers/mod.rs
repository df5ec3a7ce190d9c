mod annotations;
mod builtins;
mod classes;
mod fstring;
mod future;
mod kw_only;
mod super_call;
mod unpacking;

pub use annotations::{RemoveAnnAssignFixer, RemoveFunctionDefAnnotationsFixer};
pub use builtins::{BuiltinRenameFixer, ItertoolsBuiltinsFixer};
pub use classes::{NamedTupleClassToAssignFixer, NewStyleClassesFixer};
pub use fstring::FStringToStrFormatFixer;
pub use future::FutureImportFixer;
pub use kw_only::InlineKwOnlyArgsFixer;
pub use super_call::ShortToLongFormSuperFixer;
pub use unpacking::UnpackingGeneralizationsFixer;
