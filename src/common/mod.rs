//! Implements some helper functions that multiple challenge modules need

pub mod interface;

/// Print a `? key: value` debug line to stderr, with the values aligned.
///
/// This does not check [Settings::verbose](crate::settings::Settings), the caller has to.
pub fn veprintln(key: &str, format_args: std::fmt::Arguments) {
    eprintln!("? {key:<12}: {format_args}");
}
