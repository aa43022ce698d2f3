///
/// Macro
///
/// Declares a plain struct together with its `Record` impl.
/// The reported type name is qualified with the declaring module's path.
/// Every field type must be `Clone + Into<Value>`.
///

#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$field_meta:meta])* $field_vis:vis $field:ident : $ty:ty ),* $(,)?
        }

        table: $table:literal $(,)?
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$field_meta])* $field_vis $field : $ty ),*
        }

        impl $crate::traits::Record for $name {
            fn type_name(&self) -> &str {
                concat!(module_path!(), "::", stringify!($name))
            }

            fn table(&self) -> &str {
                $table
            }

            fn to_value(&self) -> $crate::value::Value {
                $crate::value::Value::Record(vec![
                    $(
                        (
                            stringify!($field).to_string(),
                            $crate::value::Value::from(
                                ::core::clone::Clone::clone(&self.$field),
                            ),
                        )
                    ),*
                ])
            }
        }
    };
}
