//! Helper macro for declaring port error enums.
//!
//! Each variant gets a snake-case constructor whose fields accept
//! `impl Into<T>`, so adapters can write `SeedWriteError::query(table, err.to_string())`.
//! Doc comments on fields are kept on the generated variant.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $( $(#[$field_meta])* $field : $ty ),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SampleError {
            Message { message: String } => "sample: {message}",
            Counted { table: String, count: u32 } => "sample {table}: {count}",
            Documented {
                /// Field docs are carried onto the variant.
                message: String,
            } => "documented: {message}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SampleError::message("hello");
        assert_eq!(err.to_string(), "sample: hello");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SampleError::counted("clients", 42_u32);
        assert_eq!(err.to_string(), "sample clients: 42");
    }

    #[test]
    fn documented_fields_keep_their_constructor() {
        let err = SampleError::documented("row 7");
        assert_eq!(err, SampleError::Documented { message: "row 7".to_owned() });
        assert_eq!(err.to_string(), "documented: row 7");
    }
}
