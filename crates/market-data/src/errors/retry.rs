/// Classification for retry policy.
///
/// Used by the refresh jobs to decide whether a failed fetch is worth
/// retrying on the next tick or should be reported as a configuration problem.
///
/// | Class | Retry on next schedule? | Keep cached value? |
/// |-------|-------------------------|--------------------|
/// | `Never` | No (needs operator attention) | Yes |
/// | `WithBackoff` | Yes | Yes |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - malformed payload, bad credentials or terminal failure.
    Never,

    /// Transient failure such as a timeout or rate limit.
    WithBackoff,
}

impl RetryClass {
    /// Whether a scheduled refresh should simply try again later.
    pub fn is_transient(&self) -> bool {
        matches!(self, RetryClass::WithBackoff)
    }
}
