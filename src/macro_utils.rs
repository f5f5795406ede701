/// Derive Clone using the parameters (and bounds) as specified in [];
/// fields under `@copy` are copied, the rest cloned.
macro_rules! clone_bounds {
    ([$($parmbounds:tt)*] $typename:ident [$($parm:tt)*] {
        @copy {
            $($copyfield:ident,)*
        }
        $($field:ident,)*
    }
    ) => {
        impl<$($parmbounds)*> Clone for $typename<$($parm)*> {
            fn clone(&self) -> Self {
                $typename {
                $(
                    $copyfield: self.$copyfield,
                )*
                $(
                    $field: self.$field.clone(),
                )*
                }
            }
        }
    };
}

/// Check that an index along axis 0 is in bounds, in debug builds only.
///
/// Used by the unchecked accessors.
macro_rules! debug_bounds_check {
    ($self_:ident, $index:expr) => {
        debug_assert!(
            $index < $self_.size(0),
            "index {} out of bounds for axis of length {}",
            $index,
            $self_.size(0)
        );
    };
}

/// Check that a full element index is in bounds, in debug builds only.
macro_rules! debug_bounds_check_elem {
    ($self_:ident, $index:expr) => {
        debug_assert!(
            $self_.core().contains(&$index),
            "index {:?} out of bounds for shape {:?}",
            $index,
            $self_.shape()
        );
    };
}

/// This assertion is always enabled but only verbose (formatting when
/// debug assertions are enabled).
#[cfg(debug_assertions)]
macro_rules! ndassert {
    ($e:expr, $($t:tt)*) => { assert!($e, $($t)*) }
}

#[cfg(not(debug_assertions))]
macro_rules! ndassert {
    ($e:expr, $($_ignore:tt)*) => { assert!($e) }
}
