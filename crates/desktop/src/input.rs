/// Keystroke filter for quantity/price/percent cells.
///
/// Advisory only: the engine still parses leniently whatever text reaches it.
pub fn accepts_numeric_key(current: &str, ch: char) -> bool {
    ch.is_ascii_digit() || (ch == '.' && !current.contains('.'))
}
