/// `(?, ?, ?), (?, ?, ?)` for `row_count` rows of `width` bound parameters.
pub(crate) fn value_rows(row_count: usize, width: usize) -> String {
    let row = format!("({})", vec!["?"; width].join(", "));
    vec![row; row_count].join(", ")
}
