/// Creates a single [`Turn`](crate::Turn) from a role shorthand.
///
/// ```rust
/// use alice::{Role, turn};
///
/// let greeting = turn!(model => "Ciao! Come stai oggi?");
/// assert_eq!(greeting.role, Role::Model);
/// assert_eq!(greeting.text, "Ciao! Come stai oggi?");
/// ```
#[macro_export]
macro_rules! turn {
    (user => $text:expr $(,)?) => {
        $crate::Turn::user($text)
    };
    (model => $text:expr $(,)?) => {
        $crate::Turn::model($text)
    };
    ($role:ident => $text:expr $(,)?) => {
        compile_error!("unsupported role: use user or model");
    };
}

/// Creates a `Vec<Turn>` from role/text pairs.
///
/// ```rust
/// use alice::{Role, turns};
///
/// let history = turns![
///     user => "Ciao",
///     model => "Ciao anche a te!",
/// ];
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history[0].role, Role::User);
/// assert_eq!(history[1].role, Role::Model);
/// ```
#[macro_export]
macro_rules! turns {
    () => {
        Vec::<$crate::Turn>::new()
    };
    ($($role:ident => $text:expr),+ $(,)?) => {
        vec![$($crate::turn!($role => $text)),+]
    };
}
