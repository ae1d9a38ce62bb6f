mod macros;

/// Returns the version string reported by the binaries and sent in the user
/// agent of outgoing requests.
pub fn folio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
