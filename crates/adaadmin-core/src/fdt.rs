//! Field definition table (FDT) source compaction.

/// Separator between FDT entries in the single-line form sent to the server.
pub const FDT_ENTRY_SEPARATOR: &str = "%";

/// Convert an FDT source file into its single-line wire form.
///
/// Every line loses all whitespace and anything from its first `;` onwards.
/// Lines left empty are dropped and the rest are joined with `%`.
#[must_use]
pub fn compact_fdt(source: &str) -> String {
    source
        .lines()
        .filter_map(|line| {
            let packed: String = line.chars().filter(|ch| !ch.is_whitespace()).collect();
            let entry = packed.split(';').next().unwrap_or_default();
            (!entry.is_empty()).then(|| entry.to_string())
        })
        .collect::<Vec<_>>()
        .join(FDT_ENTRY_SEPARATOR)
}
