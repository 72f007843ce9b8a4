/// Domain layer modules
///
/// Pure types describing remotes; nothing here talks to git or the filesystem.
pub mod entities;
pub mod value_objects;
