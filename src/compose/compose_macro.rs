//! The `compose!` macro for right-to-left function composition.

/// Composes functions from right to left.
///
/// `compose!(f, g, h)` returns a closure equivalent to `|x| f(g(h(x)))`,
/// following mathematical notation: the rightmost function runs first. It is
/// [`pipe!`](crate::pipe!) with the functions in reverse order.
///
/// # Laws
///
/// - **Associativity**: `compose!(f, compose!(g, h)) == compose!(compose!(f, g), h)`
/// - **Identity**: `compose!(identity, f) == f == compose!(f, identity)`
///
/// # Examples
///
/// ```
/// use xo::compose;
///
/// fn add_one(x: i32) -> i32 { x + 1 }
/// fn double(x: i32) -> i32 { x * 2 }
/// fn square(x: i32) -> i32 { x * x }
///
/// // add_one(double(square(3))) = 19
/// let composed = compose!(add_one, double, square);
/// assert_eq!(composed(3), 19);
/// ```
#[macro_export]
macro_rules! compose {
    (@reverse [] [$($reversed:expr),+]) => {
        $crate::pipe!($($reversed),+)
    };

    (@reverse [$head:expr $(, $tail:expr)*] [$($reversed:expr),*]) => {
        $crate::compose!(@reverse [$($tail),*] [$head $(, $reversed)*])
    };

    ($($function:expr),+ $(,)?) => {
        $crate::compose!(@reverse [$($function),+] [])
    };
}
