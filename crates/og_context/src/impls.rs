use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::hooks::{GetTypeHooks, TypeHooks};

// Leaf and container types without capabilities, so they can be walked as nodes.

macro_rules! impl_without_hooks {
    ($($ty:ty),* $(,)?) => {
        $(
            impl GetTypeHooks for $ty {
                #[inline]
                fn get_type_hooks() -> TypeHooks {
                    TypeHooks::of::<Self>()
                }
            }
        )*
    };
}

impl_without_hooks!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
);

impl<T: 'static> GetTypeHooks for Vec<T> {
    #[inline]
    fn get_type_hooks() -> TypeHooks {
        TypeHooks::of::<Self>()
    }
}

impl<T: 'static> GetTypeHooks for Option<T> {
    #[inline]
    fn get_type_hooks() -> TypeHooks {
        TypeHooks::of::<Self>()
    }
}

impl<T: 'static> GetTypeHooks for Box<T> {
    #[inline]
    fn get_type_hooks() -> TypeHooks {
        TypeHooks::of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use crate::hooks::GetTypeHooks;
    use crate::node::{Node, ObjectId};

    #[test]
    fn leaves_have_empty_tables() {
        assert!(u8::get_type_hooks().is_empty());
        assert!(<&'static str>::get_type_hooks().is_empty());
        assert!(Option::<u8>::get_type_hooks().is_empty());
    }

    #[test]
    fn boxed_value_is_distinct_from_box() {
        let boxed = Box::new(vec![1_u8, 2]);
        let outer: &dyn Node = &boxed;
        let inner: &dyn Node = &*boxed;

        assert_ne!(ObjectId::of(outer), ObjectId::of(inner));
        assert!(inner.node_type_name().starts_with("alloc::vec::Vec"));
    }
}
