//! Centralized validation and helper functions.

/// Maximum number of contigs allowed in a single file (DOS protection)
pub const MAX_CONTIGS: usize = 100_000;

/// Check if adding another contig would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new contig.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_contig_limit(contigs.len()).is_some() {
///     return Err(...);
/// }
/// contigs.push(new_contig); // Safe to add
/// ```
#[must_use]
pub fn check_contig_limit(count: usize) -> Option<String> {
    if count >= MAX_CONTIGS {
        Some(format!(
            "Too many contigs: adding another would exceed maximum of {MAX_CONTIGS}"
        ))
    } else {
        None
    }
}

/// Validate a REF or ALT column value.
///
/// Bases, `*`, `.`, multi-allelic lists and symbolic alleles are all accepted;
/// the value only has to be non-empty printable ASCII without whitespace.
///
/// # Examples
///
/// ```
/// use ref_reconcile::utils::validation::is_valid_allele;
///
/// assert!(is_valid_allele("A"));
/// assert!(is_valid_allele("G,T"));
/// assert!(is_valid_allele("<DEL>"));
/// assert!(!is_valid_allele(""));
/// assert!(!is_valid_allele("A G"));
/// ```
#[must_use]
pub fn is_valid_allele(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_graphic())
}
