/// Internal result of one conversion routine.
///
/// `Skip` means the source side had nothing (absent path, absent
/// optional); `Filtered` means it had something unusable (type mismatch,
/// failed transform). The dispatcher turns these into the per-shape
/// leave-unchanged / set-absent / omit-key policies; neither state ever
/// surfaces as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome<T> {
    Converted(T),
    Skip,
    Filtered,
}

impl<T> Outcome<T> {
    /// Present-but-maybe-unusable: `None` becomes `Filtered`, never `Skip`.
    pub(crate) fn from_present(present: Option<T>) -> Self {
        match present {
            Some(value) => Outcome::Converted(value),
            None => Outcome::Filtered,
        }
    }

    pub(crate) fn converted(self) -> Option<T> {
        match self {
            Outcome::Converted(value) => Some(value),
            Outcome::Skip | Outcome::Filtered => None,
        }
    }
}
