//! Helper macro for declaring port error enums.
//!
//! Each variant carries named fields and a display message. The macro derives
//! `thiserror::Error` and adds a snake_case constructor per variant whose
//! parameters accept anything convertible into the field type.

macro_rules! define_port_error {
    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*)) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty $(, $($rest:tt)*)?) => {
        define_port_error!(
            @ctor
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($($rest)*)?
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant () () $($field : $ty),*);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Unreachable { message: String } => "store unreachable: {message}",
            Rejected { message: String, attempts: u32 } => "rejected after {attempts}: {message}",
        }
    }

    #[test]
    fn constructor_accepts_str() {
        let err = SamplePortError::unreachable("timeout");
        assert_eq!(err.to_string(), "store unreachable: timeout");
    }

    #[test]
    fn constructor_supports_mixed_fields() {
        let err = SamplePortError::rejected("busy", 3_u32);
        assert_eq!(
            err,
            SamplePortError::Rejected {
                message: "busy".to_owned(),
                attempts: 3,
            }
        );
        assert_eq!(err.to_string(), "rejected after 3: busy");
    }
}
