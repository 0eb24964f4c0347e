//! The `pipe!` macro for left-to-right function composition.

/// Composes functions from left to right.
///
/// `pipe!(f, g, h)` returns a closure equivalent to `|x| h(g(f(x)))`: the
/// leftmost function is applied first and each result feeds the next
/// function.
///
/// # Syntax
///
/// - `pipe!(f)` - Returns `f` unchanged
/// - `pipe!(f, g)` - Returns `|x| g(f(x))`
/// - `pipe!(f, g, h, ...)` - Any number of functions
///
/// # Type Requirements
///
/// Every function must implement [`Fn`]; the output of each must be the
/// input of the one after it.
///
/// # Examples
///
/// ```
/// use xo::pipe;
///
/// fn trim(text: &str) -> &str { text.trim() }
/// fn shout(text: &str) -> String { text.to_uppercase() }
/// fn exclaim(text: String) -> String { format!("{text}!") }
///
/// let loud = pipe!(trim, shout, exclaim);
/// assert_eq!(loud("  hello "), "HELLO!");
/// ```
///
/// ## Relationship with `compose!`
///
/// ```
/// use xo::{compose, pipe};
///
/// let add_one = |x: i32| x + 1;
/// let double = |x: i32| x * 2;
///
/// assert_eq!(pipe!(add_one, double)(5), compose!(double, add_one)(5));
/// ```
#[macro_export]
macro_rules! pipe {
    ($function:expr $(,)?) => {
        $function
    };

    ($first:expr, $($rest:expr),+ $(,)?) => {{
        let first = $first;
        let rest = $crate::pipe!($($rest),+);
        move |input| rest(first(input))
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_pipe_single_is_unchanged() {
        let double = |x: i32| x * 2;
        assert_eq!(pipe!(double)(5), 10);
    }

    #[test]
    fn test_pipe_applies_left_first() {
        let add_one = |x: i32| x + 1;
        let double = |x: i32| x * 2;
        // double(add_one(5)) = 12
        assert_eq!(pipe!(add_one, double)(5), 12);
    }

    #[test]
    fn test_pipe_changes_types() {
        let length = |text: String| text.len();
        let is_even = |count: usize| count % 2 == 0;
        let to_text = |number: i32| number.to_string();
        assert!(pipe!(to_text, length, is_even)(1234));
    }
}
